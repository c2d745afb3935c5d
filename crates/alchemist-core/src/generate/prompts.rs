//! Prompt templates for the three dispatcher paths.

/// Map step: ask for anything relevant in one excerpt.
pub fn chunk_prompt(instruction: &str, chunk: &str) -> String {
    format!(
        "Analyze the following part of the codebase context based on this instruction:\n\
         \"{instruction}\"\n\
         PARTIAL CONTEXT:\n\
         '''\n\
         {chunk}\n\
         '''\n\n\
         Extract any relevant information found in this chunk. \
         If nothing is relevant, say \"Nothing relevant\".\n"
    )
}

/// Reduce step: synthesize one answer from the surviving findings.
pub fn reduce_prompt(findings: &str, instruction: &str) -> String {
    format!(
        "Here are the findings from analyzing different parts of the codebase:\n\n\
         {findings}\n\n\
         Based on these findings, answer the original user request:\n\
         {instruction}\n"
    )
}

/// Direct path: the instruction, with the context appended when present.
pub fn standard_prompt(instruction: &str, context: Option<&str>) -> String {
    match context {
        Some(ctx) if !ctx.is_empty() => format!("{instruction}\n\nCONTEXT:\n{ctx}"),
        _ => instruction.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_prompt_appends_context() {
        assert_eq!(standard_prompt("Explain", Some("x = 1")), "Explain\n\nCONTEXT:\nx = 1");
        assert_eq!(standard_prompt("Explain", Some("")), "Explain");
        assert_eq!(standard_prompt("Explain", None), "Explain");
    }

    #[test]
    fn chunk_prompt_embeds_instruction_and_excerpt() {
        let p = chunk_prompt("find auth", "fn login() {}");
        assert!(p.contains("\"find auth\""));
        assert!(p.contains("'''\nfn login() {}\n'''"));
        assert!(p.contains("say \"Nothing relevant\""));
    }

    #[test]
    fn reduce_prompt_orders_findings_before_request() {
        let p = reduce_prompt("A\nB", "summarize");
        let findings = p.find("A\nB").unwrap();
        let request = p.find("summarize").unwrap();
        assert!(findings < request);
    }
}
