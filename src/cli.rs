use clap::Parser;

/// ChatBot gateway: forwards chat messages to an Azure OpenAI deployment
#[derive(Debug, Parser)]
#[command(name = "chatbot-gateway", version, about)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["chatbot-gateway"]);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8080);
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::parse_from(["chatbot-gateway", "--host", "127.0.0.1", "--port", "9000"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 9000);
    }
}
