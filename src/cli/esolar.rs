use clap::{Parser, ValueEnum};
use reqwest::Url;
use secrecy::SecretString;

use crate::api::esolar::Api;

/// Regional eSolar portal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Portal {
    /// `fop.saj-electric.com`.
    Eu,

    /// `intoop.saj-electric.com`.
    International,

    /// `op.saj-electric.com`.
    China,
}

impl Portal {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Eu => "https://fop.saj-electric.com/saj",
            Self::International => "https://intoop.saj-electric.com/saj",
            Self::China => "https://op.saj-electric.com/saj",
        }
    }
}

#[derive(Parser)]
pub struct EsolarArgs {
    #[clap(long, env = "SAJ_USERNAME")]
    pub username: String,

    #[clap(long, env = "SAJ_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[clap(long, env = "SAJ_PORTAL", value_enum, default_value = "eu")]
    pub portal: Portal,

    /// Custom portal base URL, overrides `--portal`.
    #[clap(long, env = "SAJ_BASE_URL")]
    pub base_url: Option<Url>,

    /// Also fetch today's history chart and the battery details.
    #[clap(long, env = "SAJ_WITH_HISTORY")]
    pub with_history: bool,

    #[clap(long, env = "SAJ_REQUEST_TIMEOUT", default_value = "15s")]
    pub request_timeout: humantime::Duration,
}

impl EsolarArgs {
    pub fn base_url(&self) -> &str {
        self.base_url.as_ref().map_or_else(|| self.portal.base_url(), Url::as_str)
    }

    pub fn api(&self) -> Api {
        Api::builder()
            .base_url(self.base_url())
            .username(&self.username)
            .password(SecretString::from(self.password.clone()))
            .timeout(self.request_timeout.into())
            .with_history(self.with_history)
            .build()
    }
}
