//! Lambda runtime catalogue

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported Lambda runtimes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Runtime {
    #[serde(rename = "nodejs16.x")]
    Nodejs16,
    #[serde(rename = "nodejs18.x")]
    Nodejs18,
    #[serde(rename = "nodejs20.x")]
    Nodejs20,
    #[serde(rename = "nodejs22.x")]
    Nodejs22,
    #[serde(rename = "python3.9")]
    Python39,
    #[serde(rename = "python3.10")]
    Python310,
    #[serde(rename = "python3.11")]
    Python311,
    #[serde(rename = "python3.12")]
    Python312,
    #[serde(rename = "python3.13")]
    Python313,
    #[serde(rename = "provided.al2")]
    ProvidedAl2,
    #[serde(rename = "provided.al2023")]
    ProvidedAl2023,
}

/// Family of runtimes sharing a build toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeGroup {
    NodeJs,
    Python,
    Provided,
}

impl RuntimeGroup {
    /// Dependency manifest marking the root of a function's sources
    pub fn manifest_file(&self) -> Option<&'static str> {
        match self {
            Self::NodeJs => Some("package.json"),
            Self::Python => Some("requirements.txt"),
            Self::Provided => None,
        }
    }
}

impl Runtime {
    pub const ALL: [Runtime; 11] = [
        Self::Nodejs16,
        Self::Nodejs18,
        Self::Nodejs20,
        Self::Nodejs22,
        Self::Python39,
        Self::Python310,
        Self::Python311,
        Self::Python312,
        Self::Python313,
        Self::ProvidedAl2,
        Self::ProvidedAl2023,
    ];

    /// Get the Docker image for this runtime
    pub fn docker_image(&self) -> &'static str {
        match self {
            Self::Nodejs16 => "public.ecr.aws/lambda/nodejs:16",
            Self::Nodejs18 => "public.ecr.aws/lambda/nodejs:18",
            Self::Nodejs20 => "public.ecr.aws/lambda/nodejs:20",
            Self::Nodejs22 => "public.ecr.aws/lambda/nodejs:22",
            Self::Python39 => "public.ecr.aws/lambda/python:3.9",
            Self::Python310 => "public.ecr.aws/lambda/python:3.10",
            Self::Python311 => "public.ecr.aws/lambda/python:3.11",
            Self::Python312 => "public.ecr.aws/lambda/python:3.12",
            Self::Python313 => "public.ecr.aws/lambda/python:3.13",
            Self::ProvidedAl2 => "public.ecr.aws/lambda/provided:al2",
            Self::ProvidedAl2023 => "public.ecr.aws/lambda/provided:al2023",
        }
    }

    pub fn group(&self) -> RuntimeGroup {
        match self {
            Self::Nodejs16 | Self::Nodejs18 | Self::Nodejs20 | Self::Nodejs22 => {
                RuntimeGroup::NodeJs
            }
            Self::Python39
            | Self::Python310
            | Self::Python311
            | Self::Python312
            | Self::Python313 => RuntimeGroup::Python,
            Self::ProvidedAl2 | Self::ProvidedAl2023 => RuntimeGroup::Provided,
        }
    }

    /// Parse runtime string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|runtime| runtime.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nodejs16 => "nodejs16.x",
            Self::Nodejs18 => "nodejs18.x",
            Self::Nodejs20 => "nodejs20.x",
            Self::Nodejs22 => "nodejs22.x",
            Self::Python39 => "python3.9",
            Self::Python310 => "python3.10",
            Self::Python311 => "python3.11",
            Self::Python312 => "python3.12",
            Self::Python313 => "python3.13",
            Self::ProvidedAl2 => "provided.al2",
            Self::ProvidedAl2023 => "provided.al2023",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
