use crate::rules::{Rule, RuleResolver, RuleStore};

/// Handle a `list_available_rules` tool call. Never touches the store.
pub fn handle<S: RuleStore>(resolver: &RuleResolver<S>) -> String {
    render(&resolver.list_available_rules())
}

/// Render the Markdown report.
///
/// Categories appear in first-seen order. Within a category rules are
/// sorted by ascending priority; the sort is stable so ties keep their
/// enumeration order.
pub fn render(rules: &[Rule]) -> String {
    let mut groups: Vec<(&str, Vec<&Rule>)> = Vec::new();
    for rule in rules {
        match groups.iter_mut().find(|(category, _)| *category == rule.category) {
            Some((_, members)) => members.push(rule),
            None => groups.push((rule.category.as_str(), vec![rule])),
        }
    }

    let mut text = String::from("# Cursor Engineering Rules\n\n");
    text.push_str(
        "Production-grade AI agent rules for 15+ languages, multi-cloud infrastructure, and DevOps.\n\n",
    );
    text.push_str(&format!("**Total Rules:** {}\n\n", rules.len()));
    text.push_str("---\n\n");

    for (category, mut members) in groups {
        members.sort_by_key(|rule| rule.priority);

        text.push_str(&format!("## {}\n\n", capitalize(category)));
        for rule in members {
            text.push_str(&format!(
                "- **{}** (priority: {}): {}\n",
                rule.topic, rule.priority, rule.description
            ));
        }
        text.push('\n');
    }

    text.push_str("---\n\n");
    text.push_str("**Usage:** Call `fetch_rule` with category and topic to get the full rule content.\n");
    text.push_str("**Example:** `fetch_rule(category=\"languages\", topic=\"python\")`\n");
    text
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
