use std::sync::Arc;

use crate::config::Config;
use crate::core::infrastructure::PromptTemplates;
use crate::core::services::GeniusClient;
use crate::core::{LookupAdapter, LookupOptions};
use crate::error::Result;

pub struct SimpleServices {
    config: Arc<Config>,
}

impl SimpleServices {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn create_prompt_templates(&self) -> Result<PromptTemplates> {
        Ok(PromptTemplates::new(&self.config.prompts)?)
    }

    /// Fails when no Genius token is configured.
    pub fn create_genius_client(&self) -> Result<GeniusClient> {
        let token = self.config.require_token()?.clone();
        Ok(GeniusClient::new(&self.config, token)?)
    }

    pub fn create_adapter(&self) -> Result<Arc<LookupAdapter>> {
        let client = self.create_genius_client()?;
        let prompts = self.create_prompt_templates()?;
        let options = LookupOptions::from_config(&self.config);
        Ok(Arc::new(LookupAdapter::new(Arc::new(client), prompts, options)))
    }
}
