use std::io::BufRead;

use anyhow::bail;

/// The flag value if given, otherwise one line from stdin.
pub fn password_or_stdin(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("password required: pass --password or pipe it on stdin");
    }
    Ok(password)
}
