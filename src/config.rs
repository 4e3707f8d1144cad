use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub https_port: u16,
    /// Directory static files are served from. No process-wide chdir;
    /// the handler gets this explicitly.
    pub doc_root: PathBuf,
    /// File served for the root path `/`.
    pub client_page: String,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let doc_root: PathBuf = env::var("DOC_ROOT").unwrap_or_else(|_| ".".to_string()).into();
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            https_port: env::var("HTTPS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3443),
            client_page: env::var("CLIENT_PAGE")
                .unwrap_or_else(|_| "walkie-talkie-improved.html".to_string()),
            cert_path: env::var("CERT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| doc_root.join("server.crt")),
            key_path: env::var("KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| doc_root.join("server.key")),
            doc_root,
        }
    }
}
