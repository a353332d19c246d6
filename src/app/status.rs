use crate::config::Config;
use crate::session::KeyValueStore;

/// Show only the head and tail of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

pub fn render_status(config: &Config, store: &dyn KeyValueStore, ephemeral: bool) -> String {
    let conversation = match store.get(&config.session_key) {
        Ok(Some(token)) if !token.is_empty() => format!("active ({})", mask_token(&token)),
        Ok(_) => "none".to_string(),
        Err(e) => format!("unreadable ({e})"),
    };
    let storage = if ephemeral {
        "in-memory (--ephemeral)".to_string()
    } else {
        config.state_file().display().to_string()
    };
    let timeout = config
        .request_timeout_secs
        .map_or_else(|| "none".to_string(), |secs| format!("{secs}s"));

    [
        "◆ humanic status".to_string(),
        String::new(),
        format!("Version       {}", env!("CARGO_PKG_VERSION")),
        format!("Config        {}", config.config_path.display()),
        format!("State         {storage}"),
        String::new(),
        format!("  Assistant   {}", config.assistant_name),
        format!("  Endpoint    {}", config.endpoint),
        format!("  Timeout     {timeout}"),
        format!("  Session     {conversation}"),
    ]
    .join("\n")
}
