#[cfg(test)]
pub mod test {
    use crate::option::{Opt, Schema};

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct AppConfig {
        pub name: String,
        pub server: ServerConfig,
        pub tags: Vec<String>,
        pub ratio: f64,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
        pub tls: TlsConfig,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct TlsConfig {
        pub enabled: bool,
        pub cert: Option<String>,
    }

    /// `name`, `server{host, port, tls{enabled, cert}}`, `tags`, `ratio`.
    pub fn app_schema() -> Schema<AppConfig> {
        Schema::new(vec![
            Opt::leaf("name", |c: &mut AppConfig| &mut c.name),
            Opt::parent(
                "server",
                vec![
                    Opt::leaf("host", |c: &mut AppConfig| &mut c.server.host),
                    Opt::leaf("port", |c: &mut AppConfig| &mut c.server.port),
                    Opt::parent(
                        "tls",
                        vec![
                            Opt::leaf("enabled", |c: &mut AppConfig| &mut c.server.tls.enabled),
                            Opt::leaf("cert", |c: &mut AppConfig| &mut c.server.tls.cert),
                        ],
                    ),
                ],
            ),
            Opt::leaf("tags", |c: &mut AppConfig| &mut c.tags),
            Opt::leaf("ratio", |c: &mut AppConfig| &mut c.ratio),
        ])
        .unwrap()
    }

    #[test]
    fn app_schema_builds() {
        let schema = app_schema();
        assert_eq!(schema.opts().len(), 4);
    }
}
