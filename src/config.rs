use std::path::PathBuf;

const DEFAULT_ADDR: &str = "127.0.0.1:4221";
const DEFAULT_WORKERS: usize = 10;

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Host directory for file serving and creation. File routes are only
    /// registered when this is set.
    pub directory: Option<PathBuf>,
    pub workers: usize,
}

impl Config {
    pub fn load() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Scans `--addr`, `--directory` and `--workers` flags. Unknown
    /// arguments are ignored, as is a trailing flag with no value.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut config = Config {
            listen_addr: DEFAULT_ADDR.to_string(),
            directory: None,
            workers: DEFAULT_WORKERS,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--addr" => {
                    if let Some(addr) = args.next() {
                        config.listen_addr = addr;
                    }
                }
                "--directory" => {
                    config.directory = args.next().map(PathBuf::from);
                }
                "--workers" => {
                    if let Some(n) = args.next().and_then(|v| v.parse().ok()) {
                        if n > 0 {
                            config.workers = n;
                        }
                    }
                }
                _ => {}
            }
        }

        config
    }
}
