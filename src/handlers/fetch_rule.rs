use crate::protocol::FetchRuleParams;
use crate::rules::{Rule, RuleError, RuleResolver, RuleStore};

/// Handle a `fetch_rule` tool call.
pub async fn handle<S: RuleStore>(
    resolver: &RuleResolver<S>,
    params: &FetchRuleParams,
) -> Result<String, RuleError> {
    let rule = resolver.fetch_rule(&params.category, &params.topic).await?;
    Ok(render(&rule))
}

pub fn render(rule: &Rule) -> String {
    format!(
        "# {}\n\n{}\n\nPriority: {}\n\n---\n\n{}",
        rule.title, rule.description, rule.priority, rule.content
    )
}
