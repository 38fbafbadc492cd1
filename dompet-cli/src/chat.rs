use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Daily transcript under `<home>/chat/YYYY-MM-DD.md`
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn open_today(home: &Path) -> Result<Self> {
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        Ok(Self {
            path: dir.join(format!("{today}.md")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_system(&mut self, msg: &str) -> Result<()> {
        self.append("system", msg)
    }

    pub fn append_user(&mut self, msg: &str) -> Result<()> {
        self.append("user", msg)
    }

    pub fn append_assistant(&mut self, msg: &str) -> Result<()> {
        self.append("dompet", msg)
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "q"];

fn is_exit(line: &str) -> bool {
    EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

/// Line-based chat: one message per line until EOF or an exit word.
/// Returns the number of messages answered.
pub fn chat_loop<R, W, F>(
    input: R,
    output: &mut W,
    mut log: Option<&mut ChatLog>,
    mut reply: F,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> String,
{
    writeln!(
        output,
        "Dompet siap membantu. Ketik `!help` untuk panduan, `exit` untuk keluar."
    )?;
    if let Some(log) = log.as_deref_mut() {
        log.append_system("session_start")?;
    }

    let mut answered = 0;
    for line in input.lines() {
        let line = line.context("read input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_exit(trimmed) {
            break;
        }

        let answer = reply(trimmed);
        writeln!(output, "{answer}\n")?;
        output.flush()?;
        answered += 1;

        if let Some(log) = log.as_deref_mut() {
            log.append_user(trimmed)?;
            log.append_assistant(&answer)?;
        }
    }

    if let Some(log) = log.as_deref_mut() {
        log.append_system("session_end")?;
    }
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_loop_stops_at_exit_word() {
        let input = Cursor::new("halo\n\n  saldo  \nQUIT\nsetelah keluar\n");
        let mut out = Vec::new();
        let mut seen = Vec::new();

        let n = chat_loop(input, &mut out, None, |msg| {
            seen.push(msg.to_string());
            format!("echo {msg}")
        })
        .unwrap();

        assert_eq!(n, 2);
        assert_eq!(seen, vec!["halo", "saldo"]);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("echo saldo"));
        assert!(!printed.contains("setelah keluar"));
    }

    #[test]
    fn test_transcript_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = ChatLog::open_today(dir.path()).unwrap();
        let mut out = Vec::new();

        chat_loop(Cursor::new("!help\n"), &mut out, Some(&mut log), |_| {
            "baris satu\nbaris dua".to_string()
        })
        .unwrap();

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert!(log.path().starts_with(dir.path().join("chat")));
        assert!(text.contains("[system] session_start"));
        assert!(text.contains("[user] !help"));
        assert!(text.contains("[dompet] baris satu baris dua"));
        assert!(text.contains("[system] session_end"));
    }
}
