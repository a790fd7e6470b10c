use std::fmt;
use std::str::FromStr;

use super::{Rule, RuleError};

/// The closed set of rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Core,
    Languages,
    Infrastructure,
    Cloud,
    Devops,
    Patterns,
    Databases,
    Other,
}

impl Category {
    /// Declaration order, as advertised in the `fetch_rule` input schema.
    pub const ALL: [Category; 8] = [
        Category::Core,
        Category::Languages,
        Category::Infrastructure,
        Category::Cloud,
        Category::Devops,
        Category::Patterns,
        Category::Databases,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Languages => "languages",
            Self::Infrastructure => "infrastructure",
            Self::Cloud => "cloud",
            Self::Devops => "devops",
            Self::Patterns => "patterns",
            Self::Databases => "databases",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

/// One row of the catalog: identity, backing document, and display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub category: Category,
    pub topic: &'static str,
    pub document: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: u64,
}

impl CatalogEntry {
    /// Metadata-only rule; the store is never consulted.
    pub fn to_listing(&self) -> Rule {
        Rule {
            category: self.category.as_str().to_string(),
            topic: self.topic.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            priority: self.priority,
            content: String::new(),
        }
    }
}

const fn entry(
    category: Category,
    topic: &'static str,
    document: &'static str,
    title: &'static str,
    description: &'static str,
    priority: u64,
) -> CatalogEntry {
    CatalogEntry {
        category,
        topic,
        document,
        title,
        description,
        priority,
    }
}

use Category::*;

/// Single authoritative table. Both lookup and listing derive from it.
#[rustfmt::skip]
static ENTRIES: &[CatalogEntry] = &[
    entry(Core, "workflow", "050-workflow.mdc", "Development Workflow", "Plan/Implement/Review approach with Golden Rules", 50),
    entry(Core, "core-principles", "100-core.mdc", "Core Principles", "SOLID, DRY, KISS, YAGNI, Fail Fast", 100),
    entry(Core, "git", "110-git.mdc", "Git Standards", "Conventional commits, branching, commit approval", 110),
    entry(Core, "utilities", "115-utilities.mdc", "Utilities", "Ripgrep, fzf, jq, yq, and other CLI tools", 115),
    entry(Languages, "bash", "130-bash.mdc", "Bash/Shell Scripting", "POSIX compliance, ShellCheck, safety patterns", 130),
    entry(Languages, "python", "160-python.mdc", "Python", "Python 3.14+, type hints, AWS Lambda patterns", 160),
    entry(Languages, "typescript", "165-typescript.mdc", "TypeScript", "Strict mode, ESM, modern patterns", 165),
    entry(Languages, "javascript", "170-javascript.mdc", "JavaScript", "ES modules, async/await, Node.js patterns", 170),
    entry(Languages, "go", "180-go.mdc", "Go", "Idiomatic Go, error handling, concurrency", 180),
    entry(Languages, "rust", "185-rust.mdc", "Rust", "Ownership, lifetimes, async, error handling", 185),
    entry(Infrastructure, "terraform", "140-terraform.mdc", "Terraform", "Modules, state management, workspaces", 140),
    entry(Infrastructure, "ansible", "145-ansible.mdc", "Ansible", "Playbooks, roles, idempotency", 145),
    entry(Infrastructure, "cloudformation", "150-cloudformation.mdc", "CloudFormation", "Templates, stacks, nested stacks", 150),
    entry(Infrastructure, "docker", "155-docker.mdc", "Docker", "Multi-stage builds, security, optimization", 155),
    entry(Infrastructure, "helm", "195-helm.mdc", "Helm", "Charts, templating, releases", 195),
    entry(Infrastructure, "kubernetes", "260-kubernetes.mdc", "Kubernetes", "Manifests, operators, CRDs, security", 260),
    entry(Cloud, "cloudflare", "250-cloudflare.mdc", "Cloudflare", "Workers, Rules Engine, DNS, security", 250),
    entry(Cloud, "aws", "280-aws.mdc", "AWS", "EKS, VPC Lattice, Lambda, IAM", 280),
    entry(Cloud, "azure", "285-azure.mdc", "Azure", "Bicep, Key Vault, App Service", 285),
    entry(Cloud, "gcp", "290-gcp.mdc", "GCP", "GKE, Cloud Run, Secret Manager", 290),
    entry(Devops, "github-actions", "120-gha.mdc", "GitHub Actions", "Workflows, OIDC, security", 120),
    entry(Devops, "makefile", "190-makefile.mdc", "Makefile", "Phony targets, recipes, conventions", 190),
    entry(Devops, "cli", "200-cli.mdc", "CLI Tools", "argparse, typer, rich, user experience", 200),
    entry(Patterns, "open-source", "210-open-source.mdc", "Open Source", "Contributing, licensing, community", 210),
    entry(Patterns, "documentation", "220-documentation.mdc", "Documentation", "MkDocs, Docusaurus, API docs", 220),
    entry(Patterns, "mcp-servers", "230-mcp-servers.mdc", "MCP Servers", "Model Context Protocol patterns", 230),
    entry(Patterns, "configuration", "240-configuration.mdc", "Configuration", "Config management, secrets, environments", 240),
    entry(Patterns, "testing", "300-testing.mdc", "Testing", "Unit, integration, E2E testing", 300),
    entry(Patterns, "security", "310-security.mdc", "Security", "OWASP, secrets, IAM, least privilege", 310),
    entry(Patterns, "api-design", "320-api-design.mdc", "API Design", "REST, GraphQL, gRPC patterns", 320),
    entry(Patterns, "observability", "330-observability.mdc", "Observability", "Logging, metrics, tracing", 330),
    entry(Databases, "postgresql", "270-postgresql.mdc", "PostgreSQL", "Performance, replication, security", 270),
    entry(Other, "ai-ml", "295-ai-ml.mdc", "AI/ML", "Machine learning patterns and tools", 295),
    entry(Other, "markdown", "800-markdown.mdc", "Markdown", "GFM, Mermaid diagrams, documentation", 800),
];

/// Immutable registry of known rules.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
}

impl Default for Catalog {
    fn default() -> Self {
        Self { entries: ENTRIES }
    }
}

impl Catalog {
    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    /// Look up the catalog row for a `(category, topic)` pair.
    pub fn lookup(&self, category: &str, topic: &str) -> Result<&'static CatalogEntry, RuleError> {
        let unknown = || RuleError::UnknownRule {
            category: category.to_string(),
            topic: topic.to_string(),
        };
        let category: Category = category.parse().map_err(|_| unknown())?;

        self.entries
            .iter()
            .find(|e| e.category == category && e.topic == topic)
            .ok_or_else(unknown)
    }

    /// Map a `(category, topic)` pair to its document identifier.
    pub fn resolve_document(&self, category: &str, topic: &str) -> Result<&'static str, RuleError> {
        self.lookup(category, topic).map(|e| e.document)
    }

    /// Metadata-only enumeration in declaration order.
    pub fn list_all(&self) -> Vec<Rule> {
        self.entries.iter().map(CatalogEntry::to_listing).collect()
    }
}
