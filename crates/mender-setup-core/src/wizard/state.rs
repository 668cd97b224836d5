use strum::Display;

/// Steps of the setup wizard, in the order they are normally visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum State {
    DeviceType,
    HostedMender,
    DemoServer,
    ServerUrl,
    ServerIp,
    ServerCert,
    Credentials,
    Polling,
    Done,
}

impl State {
    /// Transition out of the demo-server question.
    pub(crate) fn after_demo_server(hosted: bool, demo_server: bool, demo_intervals: bool) -> Self {
        match (hosted, demo_server, demo_intervals) {
            (true, _, true) => Self::Done,
            (true, _, false) => Self::Polling,
            (false, true, _) => Self::ServerIp,
            (false, false, _) => Self::ServerUrl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_server_transitions() {
        assert_eq!(State::after_demo_server(true, false, true), State::Done);
        assert_eq!(State::after_demo_server(true, true, false), State::Polling);
        assert_eq!(State::after_demo_server(false, true, false), State::ServerIp);
        assert_eq!(State::after_demo_server(false, false, true), State::ServerUrl);
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(State::ServerCert.to_string(), "server_cert");
        assert_eq!(State::DeviceType.to_string(), "device_type");
    }
}
