use super::{Generator, Reporter};

/// Try each model in order and return the first non-empty reply.
///
/// Quota and other failures both move on to the next model; the class only
/// decides which reporter event fires. `None` once the list is exhausted.
pub async fn generate_with_fallback<G>(
    backend: &G,
    prompt: &str,
    models: &[String],
    reporter: &dyn Reporter,
) -> Option<String>
where
    G: Generator + ?Sized,
{
    for model in models {
        reporter.attempting(model);
        match backend.generate(model, prompt).await {
            Ok(text) if !text.trim().is_empty() => return Some(text),
            Ok(_) => {
                tracing::debug!(model = model.as_str(), "empty reply");
            }
            Err(err) if err.is_quota() => reporter.quota_exhausted(model, &err),
            Err(err) => reporter.call_failed(model, &err),
        }
    }
    reporter.exhausted();
    None
}
