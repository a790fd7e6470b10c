use crate::rules::{Rule, RuleError, RuleResolver, RuleStore};

/// Handle a `fetch_workflow_guide` tool call.
pub async fn handle<S: RuleStore>(resolver: &RuleResolver<S>) -> Result<String, RuleError> {
    let rule = resolver.fetch_main_guide().await?;
    Ok(render(&rule))
}

pub fn render(rule: &Rule) -> String {
    format!("# {}\n\n{}\n\n---\n\n{}", rule.title, rule.description, rule.content)
}
