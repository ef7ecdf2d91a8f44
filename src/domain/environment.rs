//! The generated conda environment description

use super::PythonFloor;
use serde::{Deserialize, Serialize};

/// Default conda channel
pub const DEFAULT_CHANNEL: &str = "conda-forge";

/// Default packaging tool installed through pip
pub const DEFAULT_BUILD_TOOL: &str = "flit";

/// Fixed parts of the generated environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Channels listed in the environment, in order
    pub channels: Vec<String>,
    /// Packaging tool placed first in the pip block
    pub build_tool: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            channels: vec![DEFAULT_CHANNEL.to_string()],
            build_tool: DEFAULT_BUILD_TOOL.to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Replace the channel list (ignored when empty)
    pub fn with_channels(mut self, channels: Vec<String>) -> Self {
        if !channels.is_empty() {
            self.channels = channels;
        }
        self
    }

    /// Set the packaging tool
    pub fn with_build_tool(mut self, build_tool: impl Into<String>) -> Self {
        self.build_tool = build_tool.into();
        self
    }

    /// Channel used for repository lookups
    pub fn primary_channel(&self) -> &str {
        self.channels
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_CHANNEL)
    }
}

/// One entry of the `dependencies` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    /// A conda match spec
    Package(String),
    /// The nested pip install block
    Pip { pip: Vec<String> },
}

/// A conda environment.yml document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDescription {
    pub name: String,
    pub channels: Vec<String>,
    pub dependencies: Vec<DependencyEntry>,
}

impl EnvironmentDescription {
    /// Assemble the environment from resolved requirements
    ///
    /// Layout: python constraint, `pip`, the pip block (build tool first, then
    /// `pip_fallback` sorted), then `repository_matches` sorted.
    pub fn assemble(
        name: impl Into<String>,
        python_floor: Option<&PythonFloor>,
        config: &EnvironmentConfig,
        repository_matches: &[String],
        pip_fallback: &[String],
    ) -> Self {
        let mut pip = Vec::with_capacity(pip_fallback.len() + 1);
        pip.push(config.build_tool.clone());
        pip.extend(sorted(pip_fallback));

        let mut dependencies = vec![
            DependencyEntry::Package(PythonFloor::dependency(python_floor)),
            DependencyEntry::Package("pip".to_string()),
            DependencyEntry::Pip { pip },
        ];
        dependencies.extend(
            sorted(repository_matches)
                .into_iter()
                .map(DependencyEntry::Package),
        );

        Self {
            name: name.into(),
            channels: config.channels.clone(),
            dependencies,
        }
    }

    /// Entries installed from the conda channels, excluding python and pip
    pub fn repository_packages(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .skip(2)
            .filter_map(|entry| match entry {
                DependencyEntry::Package(spec) => Some(spec.as_str()),
                DependencyEntry::Pip { .. } => None,
            })
            .collect()
    }

    /// Entries of the pip block, including the build tool
    pub fn pip_packages(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .find_map(|entry| match entry {
                DependencyEntry::Pip { pip } => Some(pip.iter().map(String::as_str).collect()),
                DependencyEntry::Package(_) => None,
            })
            .unwrap_or_default()
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn sorted(items: &[String]) -> Vec<String> {
    let mut items = items.to_vec();
    items.sort();
    items.dedup();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_config() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.channels, vec!["conda-forge"]);
        assert_eq!(config.build_tool, "flit");
        assert_eq!(config.primary_channel(), "conda-forge");
    }

    #[test]
    fn test_config_with_empty_channels_keeps_default() {
        let config = EnvironmentConfig::default().with_channels(Vec::new());
        assert_eq!(config.channels, vec!["conda-forge"]);
    }

    #[test]
    fn test_config_builders() {
        let config = EnvironmentConfig::default()
            .with_channels(strings(&["bioconda", "conda-forge"]))
            .with_build_tool("hatch");
        assert_eq!(config.primary_channel(), "bioconda");
        assert_eq!(config.build_tool, "hatch");
    }

    #[test]
    fn test_assemble_layout() {
        let floor = PythonFloor::parse(">=3.7").unwrap();
        let env = EnvironmentDescription::assemble(
            "metadsl",
            Some(&floor),
            &EnvironmentConfig::default(),
            &strings(&["typing_inspect", "mypy"]),
            &strings(&["pudb"]),
        );

        assert_eq!(env.name, "metadsl");
        assert_eq!(env.channels, vec!["conda-forge"]);
        assert_eq!(
            env.dependencies,
            vec![
                DependencyEntry::Package("python>=3.7".to_string()),
                DependencyEntry::Package("pip".to_string()),
                DependencyEntry::Pip {
                    pip: strings(&["flit", "pudb"])
                },
                DependencyEntry::Package("mypy".to_string()),
                DependencyEntry::Package("typing_inspect".to_string()),
            ]
        );
        assert_eq!(env.repository_packages(), vec!["mypy", "typing_inspect"]);
        assert_eq!(env.pip_packages(), vec!["flit", "pudb"]);
    }

    #[test]
    fn test_assemble_without_floor() {
        let env = EnvironmentDescription::assemble(
            "wants-beni",
            None,
            &EnvironmentConfig::default(),
            &[],
            &strings(&["beni"]),
        );
        assert_eq!(
            env.dependencies[0],
            DependencyEntry::Package("python".to_string())
        );
        assert!(env.repository_packages().is_empty());
    }

    #[test]
    fn test_yaml_shape() {
        let env = EnvironmentDescription::assemble(
            "demo",
            None,
            &EnvironmentConfig::default(),
            &strings(&["numpy"]),
            &strings(&["pudb"]),
        );
        let yaml = env.to_yaml().unwrap();
        let expected = "\
name: demo
channels:
- conda-forge
dependencies:
- python
- pip
- pip:
  - flit
  - pudb
- numpy
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_yaml_roundtrip_parses_as_structured_data() {
        let env = EnvironmentDescription::assemble(
            "demo",
            None,
            &EnvironmentConfig::default(),
            &strings(&["numpy>=1.20"]),
            &[],
        );
        let parsed: EnvironmentDescription = serde_yaml::from_str(&env.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, env);
    }

    #[test]
    fn test_json_shape() {
        let env = EnvironmentDescription::assemble(
            "demo",
            None,
            &EnvironmentConfig::default(),
            &[],
            &[],
        );
        let value: serde_json::Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
        assert_eq!(value["name"], "demo");
        assert_eq!(value["dependencies"][2]["pip"][0], "flit");
    }
}
