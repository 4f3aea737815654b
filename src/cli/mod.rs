use clap::Parser;
use crate::models::wire::Mode;
use crate::render::list::DEFAULT_VIEWPORT_LINES;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the chat server (e.g., http://127.0.0.1:5000)
    #[arg(long, env = "CHAT_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    pub server_url: String,

    /// Path of the chat endpoint on the server.
    #[arg(long, env = "CHAT_PATH", default_value = "/chat")]
    pub chat_path: String,

    /// Chat personality (general, kids)
    #[arg(long, env = "CHAT_MODE", default_value = "general")]
    pub mode: Mode,

    /// Optional response language forwarded to the server (e.g., english, tamil)
    #[arg(long, env = "CHAT_LANGUAGE")]
    pub language: Option<String>,

    /// Optional JSON file replacing the built-in kids-mode keyword table.
    #[arg(long, env = "KEYWORDS_PATH")]
    pub keywords_path: Option<String>,

    /// Height of the message viewport in lines.
    #[arg(long, env = "VIEWPORT_LINES", default_value_t = DEFAULT_VIEWPORT_LINES)]
    pub viewport_lines: usize,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_general_mode() {
        let args = Args::try_parse_from(["safety-chat"]).unwrap();
        assert_eq!(args.mode, Mode::General);
        assert_eq!(args.chat_path, "/chat");
        assert_eq!(args.language, None);
    }

    #[test]
    fn parses_kids_mode() {
        let args = Args::try_parse_from(["safety-chat", "--mode", "kids", "--language", "tamil"]).unwrap();
        assert_eq!(args.mode, Mode::Kids);
        assert_eq!(args.language.as_deref(), Some("tamil"));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["safety-chat", "--mode", "legal"]).is_err());
    }
}
