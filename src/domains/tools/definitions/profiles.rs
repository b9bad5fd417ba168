//! Profile tools.
//!
//! Profiles are the people in a Klaviyo account. `first_name`, `last_name`
//! and free-form `properties` are all written under `attributes.properties`.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::klaviyo::{Document, KlaviyoClient};
use crate::domains::tools::common::{EmailAddress, FilteredPageParams, filled, require_any};
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

const PROFILE: &str = "profile";

/// Profile tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetProfilesTool>(),
        ToolEntry::of::<GetProfileTool>(),
        ToolEntry::of::<CreateProfileTool>(),
        ToolEntry::of::<UpdateProfileTool>(),
        ToolEntry::of::<DeleteProfileTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProfileIdParams {
    #[schemars(description = "The ID of the profile")]
    pub profile_id: String,
}

/// Fields shared by create and update.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ProfileFields {
    #[schemars(description = "Email address for the profile")]
    pub email: Option<EmailAddress>,

    #[schemars(description = "Phone number for the profile")]
    pub phone_number: Option<String>,

    #[schemars(description = "External ID for the profile")]
    pub external_id: Option<String>,

    #[schemars(description = "First name")]
    pub first_name: Option<String>,

    #[schemars(description = "Last name")]
    pub last_name: Option<String>,

    #[schemars(description = "Additional properties as a JSON object")]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateProfileParams {
    #[schemars(description = "The ID of the profile to update")]
    pub profile_id: String,

    #[serde(flatten)]
    pub fields: ProfileFields,
}

#[derive(Debug, Serialize)]
struct ProfileAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Map<String, Value>>,
}

impl ProfileFields {
    fn has_identifier(&self) -> bool {
        self.email.is_some()
            || self.phone_number.as_deref().is_some_and(|v| !v.trim().is_empty())
            || self.external_id.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    /// Split into top-level attributes and the merged `properties` object.
    ///
    /// Keys in `properties` override `first_name`/`last_name`.
    fn into_attributes(self) -> (ProfileAttributes, Map<String, Value>) {
        let mut properties = Map::new();
        if let Some(first_name) = filled(self.first_name) {
            properties.insert("first_name".to_string(), Value::String(first_name));
        }
        if let Some(last_name) = filled(self.last_name) {
            properties.insert("last_name".to_string(), Value::String(last_name));
        }
        if let Some(extra) = self.properties {
            properties.extend(extra);
        }

        let attributes = ProfileAttributes {
            email: self.email,
            phone_number: filled(self.phone_number),
            external_id: filled(self.external_id),
            properties: None,
        };
        (attributes, properties)
    }
}

pub struct GetProfilesTool;

#[async_trait]
impl KlaviyoTool for GetProfilesTool {
    const NAME: &'static str = "get_profiles";
    const DESCRIPTION: &'static str = "Get a list of profiles with optional filtering";
    type Params = FilteredPageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_profiles(&params.query()).await?.into())
    }
}

pub struct GetProfileTool;

#[async_trait]
impl KlaviyoTool for GetProfileTool {
    const NAME: &'static str = "get_profile";
    const DESCRIPTION: &'static str = "Get a specific profile by ID";
    type Params = ProfileIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_profile(&params.profile_id).await?.into())
    }
}

pub struct CreateProfileTool;

#[async_trait]
impl KlaviyoTool for CreateProfileTool {
    const NAME: &'static str = "create_profile";
    const DESCRIPTION: &'static str = "Create a new profile";
    type Params = ProfileFields;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        require_any(
            &[params.has_identifier()],
            "email, phone_number, or external_id",
        )?;

        let (mut attributes, properties) = params.into_attributes();
        attributes.properties = Some(properties);

        let body = Document::create(PROFILE, attributes);
        Ok(client.create_profile(&body).await?.into())
    }
}

pub struct UpdateProfileTool;

#[async_trait]
impl KlaviyoTool for UpdateProfileTool {
    const NAME: &'static str = "update_profile";
    const DESCRIPTION: &'static str = "Update an existing profile";
    type Params = UpdateProfileParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let (mut attributes, properties) = params.fields.into_attributes();
        if !properties.is_empty() {
            attributes.properties = Some(properties);
        }

        let body = Document::update(PROFILE, params.profile_id.as_str(), attributes);
        Ok(client.update_profile(&params.profile_id, &body).await?.into())
    }
}

pub struct DeleteProfileTool;

#[async_trait]
impl KlaviyoTool for DeleteProfileTool {
    const NAME: &'static str = "delete_profile";
    const DESCRIPTION: &'static str = "Delete a profile";
    type Params = ProfileIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        client.delete_profile(&params.profile_id).await?;
        Ok(ToolReply::message(format!(
            "Profile {} successfully deleted",
            params.profile_id
        )))
    }
}
