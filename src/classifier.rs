/// Canonical leading token of a command line.
///
/// `sudo` is kept as context (`sudo apt`), and leading `KEY=VALUE`
/// assignments are skipped so `NODE_ENV=prod node app.js` becomes `node`.
/// Frequency, git and package-manager analysis all group by this value.
pub fn extract_base_command(command: &str) -> String {
    let trimmed = command.trim();

    if let Some(after_sudo) = trimmed.strip_prefix("sudo ") {
        let target = after_sudo.split_whitespace().next().unwrap_or("");
        return format!("sudo {}", target).trim().to_string();
    }

    let mut parts = trimmed.split_whitespace().peekable();
    let first = parts.peek().copied().unwrap_or("");
    parts
        .find(|part| !part.contains('='))
        .unwrap_or(first)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_commands() {
        assert_eq!(extract_base_command("git commit -m 'hello'"), "git");
        assert_eq!(extract_base_command("  ls -la  "), "ls");
        assert_eq!(extract_base_command("htop"), "htop");
    }

    #[test]
    fn test_sudo_is_preserved() {
        assert_eq!(extract_base_command("sudo apt install vim"), "sudo apt");
        assert_eq!(extract_base_command("sudo   systemctl restart nginx"), "sudo systemctl");
        assert_eq!(extract_base_command("sudo "), "sudo");
        // no space after sudo: an ordinary token
        assert_eq!(extract_base_command("sudo"), "sudo");
    }

    #[test]
    fn test_env_assignments_are_skipped() {
        assert_eq!(extract_base_command("NODE_ENV=prod node app.js"), "node");
        assert_eq!(extract_base_command("A=1 B=2 cargo run"), "cargo");
    }

    #[test]
    fn test_all_assignments_or_empty() {
        assert_eq!(extract_base_command("FOO=bar"), "FOO=bar");
        assert_eq!(extract_base_command("A=1 B=2"), "A=1");
        assert_eq!(extract_base_command(""), "");
        assert_eq!(extract_base_command("   "), "");
    }
}
