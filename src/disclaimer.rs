//! Legal notice and the confirmation gate shown before any action

use std::io::{BufRead, IsTerminal, Write};

use crate::error::Result;

pub const LEGAL_NOTICE: &str = r#"
*******************************************************************************
                      EDUCATIONAL SECURITY TOOL - LEGAL NOTICE
*******************************************************************************

THIS TOOL IS FOR EDUCATIONAL PURPOSES ONLY IN CONTROLLED LAB ENVIRONMENTS.

IMPORTANT LEGAL AND ETHICAL CONSTRAINTS:
- DO NOT use this tool on any systems, services, or accounts you do not own
- DO NOT use this tool without explicit written permission from the system owner
- DO NOT use this tool against any production systems or real user accounts
- This tool operates ONLY on local, user-provided test data
- The author accepts NO RESPONSIBILITY for misuse of this tool

By proceeding, you confirm that:
1. You will use this tool only in your own lab environment
2. You understand the legal consequences of unauthorized testing
3. You accept full responsibility for your use of this tool
4. You are using this tool for legitimate educational purposes

*******************************************************************************
"#;

pub const CONFIRMATION_PROMPT: &str = "Do you understand and accept these terms? (yes/NO):";

/// Only a literal "yes" counts, ignoring case and surrounding whitespace
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Read one answer line from `reader`. End of input counts as a refusal.
pub fn confirm_from_reader<R: BufRead>(reader: &mut R) -> Result<bool> {
    let mut line = String::new();
    let read = reader.read_line(&mut line)?;
    Ok(read > 0 && is_affirmative(&line))
}

/// Print the legal notice and block until the user answers.
///
/// On a terminal the answer is read through an interactive prompt; otherwise a
/// single line is read from stdin.
pub fn request_confirmation() -> Result<bool> {
    println!("{}", LEGAL_NOTICE);

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        let answer = inquire::Text::new(CONFIRMATION_PROMPT).prompt();
        return match answer {
            Ok(answer) => Ok(is_affirmative(&answer)),
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => Ok(false),
            Err(e) => Err(e.into()),
        };
    }

    print!("{} ", CONFIRMATION_PROMPT);
    std::io::stdout().flush()?;
    let accepted = confirm_from_reader(&mut stdin.lock())?;
    println!();
    Ok(accepted)
}
