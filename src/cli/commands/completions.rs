//! Shell completions generation.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::DateFixerError;

const BIN_NAME: &str = "datefixer";

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell, install: bool) -> Result<String, DateFixerError> {
    if install {
        Ok(completion_install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, DateFixerError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    generate_to(&mut buf, shell, &mut cmd);
    String::from_utf8(buf).map_err(|e| DateFixerError::Parse(format!("UTF-8 error: {e}")))
}

fn generate_to<W: Write>(buf: &mut W, shell: Shell, cmd: &mut clap::Command) {
    clap_complete::generate(shell, cmd, BIN_NAME, buf);
}

/// Installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(datefixer completions bash)

# Or save to a file:
datefixer completions bash > ~/.local/share/bash-completion/completions/datefixer
"
        .to_string(),

        Shell::Zsh => r"# Save to your fpath:
datefixer completions zsh > ~/.zsh/completions/_datefixer
# Then add to ~/.zshrc (before compinit):
fpath=(~/.zsh/completions $fpath)
autoload -Uz compinit && compinit
"
        .to_string(),

        Shell::Fish => r"# Save to the fish completions directory:
datefixer completions fish > ~/.config/fish/completions/datefixer.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
datefixer completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to the elvish library directory:
datefixer completions elvish > ~/.config/elvish/lib/datefixer.elv
# Then add to ~/.config/elvish/rc.elv:
use datefixer
"
        .to_string(),

        _ => format!("Run `{BIN_NAME} completions <shell>` and source the output.\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("datefixer"));
        assert!(script.contains("inspect"));
        assert!(script.contains("shift"));
    }

    #[test]
    fn test_generate_zsh_completions() {
        let script = generate_completions(Shell::Zsh).unwrap();
        assert!(script.contains("#compdef datefixer"));
    }

    #[test]
    fn test_install_instructions() {
        let text = completions(Shell::Fish, true).unwrap();
        assert!(text.contains("datefixer completions fish"));
        assert!(completion_install_instructions(Shell::Zsh).contains("_datefixer"));
    }
}
