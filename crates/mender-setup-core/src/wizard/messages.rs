// Prompt and response texts shown by the wizard.
//
// Interval prompts name their defaults literally; keep them in sync with
// the DEFAULT_*_POLL constants.

use crate::{DEFAULT_SERVER_IP, DEFAULT_SERVER_URL, HOSTED_MENDER_URL, MIN_POLL_INTERVAL};

pub const BANNER: &str = "Mender Client Setup\n\
===================\n\n\
Setting up the Mender client: The client will regularly poll the server to \
check for updates and report its inventory data.\n\
Get started by first configuring the device type and settings for \
communicating with the server.";

pub const DONE: &str = "Mender setup successfully.";

pub const HOSTED_MENDER: &str = "\nAre you connecting this device to hosted.mender.io? [Y/n] ";

pub const DEMO_SERVER: &str = "\nDemo server uses a self-signed certificate for \
\"docker.mender.io\" and modifies the device's /etc/hosts with the server's IP \
address (required if using the Mender demo server).\n\
Do you want to configure the client for a demo server? [Y/n] ";

pub const DEMO_INTERVALS: &str = "\nDemo intervals use short poll and retry intervals \
(recommended for testing).\n\
Do you want to run the client in demo mode? [Y/n] ";

pub const SERVER_CERT: &str = "\nSet the location of the certificate of the server; \
leave blank if using http (not recommended) or a certificate from a known authority \
(filepath, for example /etc/mender/server.crt): ";

pub const CREDENTIALS: &str = "Enter your credentials for hosted.mender.io";
pub const EMAIL: &str = "Email: ";
pub const PASSWORD: &str = "Password: ";
pub const PASSWORD_BLANK: &str = "Password cannot be blank.";

pub const UPDATE_POLL: &str = "\nSet the update poll interval - the frequency with which \
the client will send an update check request to the server, in seconds: [1800] ";

pub const INVENTORY_POLL: &str = "Set the inventory poll interval - the frequency with which \
the client will send inventory data to the server, in seconds: [28800] ";

pub const RETRY_POLL: &str = "\nSet the retry poll interval - the frequency with which the \
client tries to communicate with the server (note: the client may attempt more often \
initially based on the previous intervals, but will fall back to this value if the \
server is busy) [300] ";

pub const SELECT_YES_NO: &str = "Please select Y or N: ";
pub const HOSTED_LOGIN_FAILED: &str =
    "We couldn't find a Hosted Mender account with those credentials.\nPlease try again: ";
pub const NOT_SECONDS: &str =
    "The value you entered wasn't an integer number.\nPlease enter a number (in seconds): ";
pub const INVALID_URL: &str = "Please enter a valid url for the server: ";
pub const INVALID_IP: &str = "Please enter a valid IP address: ";

pub fn device_type(default: &str) -> String {
    format!(
        "\nThe device type property is used to determine which Mender Artifacts are \
         compatible with this device.\n\
         Enter a name for the device type (e.g. raspberrypi3): [{default}] "
    )
}

pub fn invalid_device_type(answer: &str, default: &str) -> String {
    format!(
        "The device type \"{answer}\" contains spaces or special characters.\n\
         Please try again: [{default}] "
    )
}

pub fn server_url() -> String {
    format!("\nSet the URL of the Mender Server: [{DEFAULT_SERVER_URL}] ")
}

pub fn server_ip() -> String {
    format!("\nSet the IP of the Mender Server: [{DEFAULT_SERVER_IP}] ")
}

pub fn invalid_email(answer: &str) -> String {
    format!("\n\"{answer}\" does not appear to be a valid email address.\nPlease enter a valid email address: ")
}

pub fn file_not_found(path: &str) -> String {
    format!("The file '{path}' does not exist.\nPlease try again: ")
}

pub fn interval_too_short() -> String {
    format!("Polling interval too short.\nPlease enter a value of minimum {MIN_POLL_INTERVAL} seconds: ")
}

pub fn connection_error() -> String {
    format!(
        "There was a problem connecting to {HOSTED_MENDER_URL}.\n\
         Please check your device's connection and try again."
    )
}
