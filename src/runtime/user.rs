//! User interaction operations (confirmation prompts).

use anyhow::Result;

use super::RealRuntime;

use std::io::{self, BufRead, Write};

/// Reads answers until one is recognised. Empty input and end of input count
/// as "no".
pub(crate) fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    loop {
        write!(output, "{} [y/N] ", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer 'y' or 'n'.")?,
        }
    }
}

impl RealRuntime {
    pub(crate) fn confirm_impl(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        confirm_with_io(prompt, &mut stdin_lock, &mut stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::confirm_with_io;
    use anyhow::Result;
    use std::io::Cursor;

    #[test]
    fn confirms_yes_and_short_y() -> Result<()> {
        for case in ["y\n", "Y\n", "yes\n", " YES \n"] {
            let mut input = Cursor::new(case.as_bytes());
            let mut output = Vec::new();
            assert!(
                confirm_with_io("Overwrite?", &mut input, &mut output)?,
                "expected '{}' to be accepted as yes",
                case
            );
        }
        Ok(())
    }

    #[test]
    fn rejects_no_empty_and_eof() -> Result<()> {
        for case in ["n\n", "no\n", "\n", ""] {
            let mut input = Cursor::new(case.as_bytes());
            let mut output = Vec::new();
            assert!(
                !confirm_with_io("Overwrite?", &mut input, &mut output)?,
                "expected '{:?}' to be rejected",
                case
            );
        }
        Ok(())
    }

    #[test]
    fn asks_again_on_unrecognised_answer() -> Result<()> {
        let mut input = Cursor::new(b"maybe\nyes\n");
        let mut output = Vec::new();

        assert!(confirm_with_io("Overwrite?", &mut input, &mut output)?);

        let out = String::from_utf8(output)?;
        assert_eq!(out.matches("Overwrite? [y/N]").count(), 2);
        assert!(out.contains("Please answer 'y' or 'n'."));
        Ok(())
    }
}
