use crate::backend::Ai;
use crate::output::{print_block, print_json};
use alchemist_core::Mode;
use std::path::Path;

const INSTRUCTION: &str = "Task: Explain Concept/Code. Context is provided. Keep it concise and technical.";

pub fn run(root: &Path, mode: Mode, text: &str, json: bool) -> anyhow::Result<()> {
    let ai = Ai::connect(root, mode)?;
    let Some(answer) = ai.generate(INSTRUCTION, Some(text)) else {
        return Ok(());
    };

    if json {
        print_json(&serde_json::json!({ "explanation": answer }))?;
    } else {
        print_block("Explanation", &answer);
    }
    Ok(())
}
