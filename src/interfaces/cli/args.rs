use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Admin console for translation endpoints, specs and test cases.
#[derive(Debug, Parser)]
#[command(name = "endpoint-console", version, about)]
pub struct Cli {
    /// Config file (defaults to ./console.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Keep the session token in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long, short)]
        username: Option<String>,
        #[arg(long, short)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show whether a session token is stored
    Status,
    /// Endpoint cards with traffic and totals
    Dashboard,
    /// Open a page by its path, e.g. /endpoints/{id}
    Open { path: String },
    #[command(subcommand)]
    Endpoint(EndpointCommand),
    #[command(subcommand)]
    Spec(SpecCommand),
    #[command(subcommand)]
    Testcase(TestCaseCommand),
    /// Translate a payload through an endpoint
    Translate {
        /// Endpoint key
        key: String,
        /// Payload text; use --file to read it from disk
        payload: Option<String>,
        #[arg(long, conflicts_with = "payload")]
        file: Option<PathBuf>,
        #[arg(long, default_value = "application/json")]
        content_type: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum EndpointCommand {
    /// Endpoint detail page
    Show { id: String },
    /// Create an endpoint
    New {
        #[arg(long, default_value = "")]
        key: String,
        #[arg(long, default_value = "")]
        name: String,
        /// Definition as a JSON object
        #[arg(long)]
        definition: Option<String>,
    },
    /// Edit an endpoint; interactive when no field flags are given
    Edit {
        id: String,
        #[command(flatten)]
        fields: EndpointFields,
    },
    /// HTTP API connection details
    Connection { id: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct EndpointFields {
    #[arg(long)]
    pub key: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub definition: Option<String>,
}

impl EndpointFields {
    pub fn assignments(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(key) = &self.key {
            fields.push(("key", key.clone()));
        }
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(active) = self.active {
            fields.push(("is_active", active.to_string()));
        }
        if let Some(definition) = &self.definition {
            fields.push(("definition", definition.clone()));
        }
        fields
    }
}

#[derive(Debug, Subcommand)]
pub enum SpecCommand {
    /// Create a spec for an endpoint
    New {
        endpoint: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        version: String,
        #[command(flatten)]
        rules: SpecRuleFields,
    },
    /// Spec detail page
    Show { endpoint: String, spec: String },
    /// Edit a spec; interactive when no field flags are given
    Edit {
        endpoint: String,
        spec: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        version: Option<String>,
        #[command(flatten)]
        rules: SpecRuleFields,
    },
    /// Make this the endpoint's active spec
    Activate { endpoint: String, spec: String },
    /// Generate the translation artifact from the test cases
    Generate { endpoint: String, spec: String },
    /// Run every test case of a spec
    RunTests { endpoint: String, spec: String },
    /// Show the generated artifact
    Artifact {
        endpoint: String,
        spec: String,
        /// Generate a fresh artifact before showing it
        #[arg(long)]
        regenerate: bool,
    },
}

/// Values starting with `@` are read from the named file.
#[derive(Debug, Clone, Default, Args)]
pub struct SpecRuleFields {
    /// dynamic or compiled_artifact
    #[arg(long)]
    pub engine: Option<String>,
    #[arg(long)]
    pub input_content_type: Option<String>,
    #[arg(long)]
    pub input_schema: Option<String>,
    #[arg(long)]
    pub output_content_type: Option<String>,
    #[arg(long)]
    pub output_schema: Option<String>,
    #[arg(long)]
    pub extra_context: Option<String>,
}

impl SpecRuleFields {
    pub fn assignments(&self) -> Vec<(&'static str, String)> {
        [
            ("engine", &self.engine),
            ("input.content_type", &self.input_content_type),
            ("input.schema", &self.input_schema),
            ("output.content_type", &self.output_content_type),
            ("output.schema", &self.output_schema),
            ("extra_context", &self.extra_context),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|value| (field, value)))
        .collect()
    }
}

#[derive(Debug, Subcommand)]
pub enum TestCaseCommand {
    /// Show a test case with its last execution
    Show {
        endpoint: String,
        spec: String,
        id: String,
    },
    /// Create a test case
    New {
        endpoint: String,
        spec: String,
        #[command(flatten)]
        fields: TestCaseFields,
    },
    /// Update a test case
    Edit {
        endpoint: String,
        spec: String,
        id: String,
        #[command(flatten)]
        fields: TestCaseFields,
    },
    /// Delete a test case
    Delete {
        endpoint: String,
        spec: String,
        id: String,
    },
}

/// Values starting with `@` are read from the named file.
#[derive(Debug, Clone, Default, Args)]
pub struct TestCaseFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub input: Option<String>,
    #[arg(long)]
    pub input_content_type: Option<String>,
    #[arg(long)]
    pub expected: Option<String>,
    #[arg(long)]
    pub expected_content_type: Option<String>,
    /// success or failure
    #[arg(long)]
    pub expected_result: Option<String>,
}

impl TestCaseFields {
    pub fn assignments(&self) -> Vec<(&'static str, String)> {
        [
            ("name", &self.name),
            ("input.body", &self.input),
            ("input.content_type", &self.input_content_type),
            ("expectation.body", &self.expected),
            ("expectation.content_type", &self.expected_content_type),
            ("expectation.result", &self.expected_result),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|value| (field, value)))
        .collect()
    }
}
