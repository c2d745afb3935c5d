use crate::backend::Ai;
use crate::output::{print_block, print_json};
use alchemist_core::context::codebase_context;
use alchemist_core::Mode;
use std::path::Path;

const EMPTY_CODEBASE: &str = "No code found in repository.";

pub fn run(root: &Path, mode: Mode, question: &str, json: bool) -> anyhow::Result<()> {
    let ai = Ai::connect(root, mode)?;

    tracing::info!(root = %root.display(), "reading codebase");
    let mut context = codebase_context(root);
    if context.is_empty() {
        tracing::warn!("no source files found to analyze");
        context = EMPTY_CODEBASE.to_string();
    }

    let Some(answer) = ai.generate(&sage_prompt(question), Some(&context)) else {
        return Ok(());
    };

    if json {
        print_json(&serde_json::json!({ "question": question, "answer": answer }))?;
    } else {
        print_block("The Sage's Wisdom", &answer);
    }
    Ok(())
}

fn sage_prompt(question: &str) -> String {
    format!(
        "You are \"The Sage\", an expert software architect and technical lead.\n\
         Use the provided context to answer the user's question precisely and technically.\n\n\
         USER QUESTION:\n\
         {question}\n\n\
         Instructions:\n\
         1. Base your answer ONLY on the provided code context.\n\
         2. Be concise but deep.\n\
         3. If the answer isn't in the code, say so.\n"
    )
}
