// ── Setup run ──
//
// Ties the wizard to the real terminal, the hosted service and the
// files on disk.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tracing::{debug, info, warn};

use mender_setup_api::{HOSTED_MENDER_URL, HostedClient};
use mender_setup_config::{
    MenderConfig, Paths, add_demo_route, check_write_permissions, default_device_type,
    install_demo_certificates, load_config, save_config, write_device_type,
};
use mender_setup_core::wizard::messages;
use mender_setup_core::{
    ClientSettings, CoreError, Prompter, SetupFlags, SetupOptions, Validators, Wizard,
    WizardDefaults,
};

use crate::cli::{Cli, SetupArgs};
use crate::error::CliError;
use crate::terminal::{SpinnerTokenSource, TerminalPrompter};

/// Build the flag snapshot the wizard starts from.
pub fn flags_from_args(args: &SetupArgs) -> SetupFlags {
    SetupFlags {
        device_type: args.device_type.clone(),
        username: args.username.clone(),
        password: args.password.clone().map(SecretString::from),
        server_url: args.server_url.clone(),
        server_ip: args.server_ip.clone(),
        server_cert: args.server_cert.clone(),
        tenant_token: args.tenant_token.clone(),
        update_poll: args.update_poll,
        inventory_poll: args.inventory_poll,
        retry_poll: args.retry_poll,
        hosted_mender: args.hosted_mender,
        demo_server: args.demo_server,
        demo_polling: args.demo_polling,
        demo: args.demo,
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    // Flag conflicts fail before anything is read or written.
    let options = SetupOptions::from_flags(&flags_from_args(&cli.setup))?;

    let mut paths = Paths::from_env();
    if let Some(data) = cli.data {
        paths.data_store = data;
    }
    let config_path = cli.config.unwrap_or_else(|| paths.config_file());
    debug!(config = %config_path.display(), data = %paths.data_store.display(), "resolved paths");

    let mut config = load_config(&config_path, cli.fallback_config.as_deref())?;

    check_write_permissions(parent_dir(&config_path))?;
    check_write_permissions(&paths.data_store)?;

    let device_type_file = if config.device_type_file.is_empty() {
        Paths::device_type_file(&paths.data_store)
    } else {
        PathBuf::from(&config.device_type_file)
    };
    let defaults = WizardDefaults::new(default_device_type(&device_type_file, &paths.hostname_file));

    let validators = Validators::new()?;
    let hosted = HostedClient::new(HOSTED_MENDER_URL).map_err(CoreError::from)?;
    let auth = SpinnerTokenSource::new(&hosted, cli.quiet);
    let mut prompter = TerminalPrompter::new();

    if !cli.quiet {
        prompter.message(messages::BANNER);
    }

    let options = Wizard::new(options, &mut prompter, &auth, &validators, defaults)
        .run()
        .await?;
    let settings = options.finalize(&validators, &paths.demo_cert.to_string_lossy())?;

    persist(&mut config, &settings, &config_path, &paths)?;

    if !cli.quiet {
        prompter.message(messages::DONE);
    }
    Ok(())
}

/// Write the configuration and identity file, then the demo side files.
///
/// Failures of the demo side files only produce warnings.
fn persist(
    config: &mut MenderConfig,
    settings: &ClientSettings,
    config_path: &Path,
    paths: &Paths,
) -> Result<(), CliError> {
    let device_type_file = config.apply_settings(settings, &paths.data_store);
    save_config(config, config_path)?;
    info!(path = %config_path.display(), "wrote configuration");
    write_device_type(&device_type_file, &settings.device_type)?;

    if let Some(route) = &settings.demo_route {
        if let Err(e) = add_demo_route(&paths.hosts_file, &route.ip, &route.server_url) {
            warn!("unable to add demo server to {}: {e}", paths.hosts_file.display());
        }
    }

    if settings.install_demo_cert {
        match install_demo_certificates(&paths.demo_cert, &paths.local_trust_dir) {
            Ok(written) => debug!("installed {} demo certificate(s)", written.len()),
            Err(e) => warn!("unable to install Mender demo cert in local trust: {e}"),
        }
    }

    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
