use crate::DateTimeError;

const DATETIME_PATH: &str = "/datetime";

/// Target a [`crate::DateTimeClient`] sends its requests to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Base URL (`http://host:8000`) or fully qualified `.../datetime` URL.
    Url(String),
    /// Base host URL and port joined as `<host>:<port>/datetime`.
    HostPort { host: String, port: String },
}

impl Endpoint {
    /// Builds the request URL, failing when a required piece is blank.
    pub(crate) fn datetime_url(&self) -> Result<String, DateTimeError> {
        match self {
            Self::Url(url) => {
                let trimmed = url.trim().trim_end_matches('/');
                if trimmed.is_empty() {
                    return Err(DateTimeError::MissingEndpointConfig(
                        "server URL must be set".to_owned(),
                    ));
                }
                if trimmed.ends_with(DATETIME_PATH) {
                    Ok(trimmed.to_owned())
                } else {
                    Ok(format!("{trimmed}{DATETIME_PATH}"))
                }
            }
            Self::HostPort { host, port } => {
                let host = host.trim().trim_end_matches('/');
                let port = port.trim();
                if host.is_empty() || port.is_empty() {
                    return Err(DateTimeError::MissingEndpointConfig(
                        "server URL and port must be set".to_owned(),
                    ));
                }
                Ok(format!("{host}:{port}{DATETIME_PATH}"))
            }
        }
    }
}

/// Picks one of the two ports held by [`ServerTargets`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ServerSelector {
    #[default]
    Standard,
    Gin,
}

impl ServerSelector {
    pub const ALL: [ServerSelector; 2] = [ServerSelector::Standard, ServerSelector::Gin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Gin => "gin",
        }
    }
}

impl From<&str> for ServerSelector {
    /// `"gin"` selects the gin port; any other value selects the standard one.
    fn from(value: &str) -> Self {
        if value == "gin" {
            Self::Gin
        } else {
            Self::Standard
        }
    }
}

/// One base URL with two ports, keyed by [`ServerSelector`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerTargets {
    pub base_url: String,
    pub standard_port: String,
    pub gin_port: String,
}

impl ServerTargets {
    pub fn new(
        base_url: impl Into<String>,
        standard_port: impl Into<String>,
        gin_port: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            standard_port: standard_port.into(),
            gin_port: gin_port.into(),
        }
    }

    /// Reads targets from environment variables.
    ///
    /// Reads:
    /// - `SERVER_URL` — base URL (e.g. `http://localhost`)
    /// - `SERVER_PORT` — port of the standard server
    /// - `SERVER_PORT_GIN` — port of the gin server
    ///
    /// Unset variables read as empty; the fetch then fails with
    /// [`DateTimeError::MissingEndpointConfig`] for the selector that needs them.
    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).unwrap_or_default();
        Self::new(
            read("SERVER_URL"),
            read("SERVER_PORT"),
            read("SERVER_PORT_GIN"),
        )
    }

    pub fn port_for(&self, selector: ServerSelector) -> &str {
        match selector {
            ServerSelector::Standard => &self.standard_port,
            ServerSelector::Gin => &self.gin_port,
        }
    }

    pub fn endpoint_for(&self, selector: ServerSelector) -> Endpoint {
        Endpoint::HostPort {
            host: self.base_url.clone(),
            port: self.port_for(selector).to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, ServerSelector, ServerTargets};
    use crate::DateTimeError;

    #[test]
    fn url_gets_datetime_path_appended() {
        let endpoint = Endpoint::Url("http://localhost:8000/".to_owned());
        assert_eq!(
            endpoint.datetime_url().unwrap(),
            "http://localhost:8000/datetime"
        );
    }

    #[test]
    fn fully_qualified_url_is_kept() {
        let endpoint = Endpoint::Url("http://localhost:8000/datetime".to_owned());
        assert_eq!(
            endpoint.datetime_url().unwrap(),
            "http://localhost:8000/datetime"
        );
    }

    #[test]
    fn blank_url_is_missing_config() {
        let err = Endpoint::Url("   ".to_owned())
            .datetime_url()
            .expect_err("blank url must fail");
        assert!(matches!(err, DateTimeError::MissingEndpointConfig(_)));
    }

    #[test]
    fn host_and_port_are_joined() {
        let endpoint = Endpoint::HostPort {
            host: "http://127.0.0.1".to_owned(),
            port: "8080".to_owned(),
        };
        assert_eq!(
            endpoint.datetime_url().unwrap(),
            "http://127.0.0.1:8080/datetime"
        );
    }

    #[test]
    fn blank_host_or_port_is_missing_config() {
        for (host, port) in [("", "8080"), ("http://127.0.0.1", ""), ("", "")] {
            let err = Endpoint::HostPort {
                host: host.to_owned(),
                port: port.to_owned(),
            }
            .datetime_url()
            .expect_err("blank host or port must fail");
            assert!(matches!(err, DateTimeError::MissingEndpointConfig(_)));
        }
    }

    #[test]
    fn only_gin_selects_gin_port() {
        assert_eq!(ServerSelector::from("gin"), ServerSelector::Gin);
        assert_eq!(ServerSelector::from("standard"), ServerSelector::Standard);
        assert_eq!(ServerSelector::from("other"), ServerSelector::Standard);
        assert_eq!(ServerSelector::from("GIN"), ServerSelector::Standard);
    }

    #[test]
    fn targets_map_selector_to_port() {
        let targets = ServerTargets::new("http://testserver", "8080", "9090");

        assert_eq!(
            targets.endpoint_for(ServerSelector::Standard),
            Endpoint::HostPort {
                host: "http://testserver".to_owned(),
                port: "8080".to_owned(),
            }
        );
        assert_eq!(targets.port_for(ServerSelector::Gin), "9090");
    }
}
