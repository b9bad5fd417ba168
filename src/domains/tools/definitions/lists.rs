//! List tools, including list membership.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::klaviyo::{Document, KlaviyoClient};
use crate::domains::tools::common::PageParams;
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

const LIST: &str = "list";
const PROFILE: &str = "profile";

/// List tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetListsTool>(),
        ToolEntry::of::<GetListTool>(),
        ToolEntry::of::<CreateListTool>(),
        ToolEntry::of::<UpdateListTool>(),
        ToolEntry::of::<DeleteListTool>(),
        ToolEntry::of::<GetListProfilesTool>(),
        ToolEntry::of::<AddProfilesToListTool>(),
        ToolEntry::of::<RemoveProfilesFromListTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListIdParams {
    #[schemars(description = "The ID of the list")]
    pub list_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateListParams {
    #[schemars(description = "Name of the list")]
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateListParams {
    #[schemars(description = "The ID of the list to update")]
    pub list_id: String,

    #[schemars(description = "New name for the list")]
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListProfilesParams {
    #[schemars(description = "The ID of the list")]
    pub list_id: String,

    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListMembershipParams {
    #[schemars(description = "The ID of the list")]
    pub list_id: String,

    #[schemars(description = "Array of profile IDs")]
    pub profile_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ListAttributes {
    name: String,
}

pub struct GetListsTool;

#[async_trait]
impl KlaviyoTool for GetListsTool {
    const NAME: &'static str = "get_lists";
    const DESCRIPTION: &'static str = "Get all lists";
    type Params = PageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_lists(&params.query()).await?.into())
    }
}

pub struct GetListTool;

#[async_trait]
impl KlaviyoTool for GetListTool {
    const NAME: &'static str = "get_list";
    const DESCRIPTION: &'static str = "Get a specific list by ID";
    type Params = ListIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_list(&params.list_id).await?.into())
    }
}

pub struct CreateListTool;

#[async_trait]
impl KlaviyoTool for CreateListTool {
    const NAME: &'static str = "create_list";
    const DESCRIPTION: &'static str = "Create a new list";
    type Params = CreateListParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let body = Document::create(LIST, ListAttributes { name: params.name });
        Ok(client.create_list(&body).await?.into())
    }
}

pub struct UpdateListTool;

#[async_trait]
impl KlaviyoTool for UpdateListTool {
    const NAME: &'static str = "update_list";
    const DESCRIPTION: &'static str = "Update an existing list";
    type Params = UpdateListParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let body = Document::update(
            LIST,
            params.list_id.as_str(),
            ListAttributes { name: params.name },
        );
        Ok(client.update_list(&params.list_id, &body).await?.into())
    }
}

pub struct DeleteListTool;

#[async_trait]
impl KlaviyoTool for DeleteListTool {
    const NAME: &'static str = "delete_list";
    const DESCRIPTION: &'static str = "Delete a list";
    type Params = ListIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        client.delete_list(&params.list_id).await?;
        Ok(ToolReply::message(format!(
            "List {} successfully deleted",
            params.list_id
        )))
    }
}

pub struct GetListProfilesTool;

#[async_trait]
impl KlaviyoTool for GetListProfilesTool {
    const NAME: &'static str = "get_list_profiles";
    const DESCRIPTION: &'static str = "Get profiles in a list";
    type Params = ListProfilesParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client
            .get_list_profiles(&params.list_id, &params.page.query())
            .await?
            .into())
    }
}

pub struct AddProfilesToListTool;

#[async_trait]
impl KlaviyoTool for AddProfilesToListTool {
    const NAME: &'static str = "add_profiles_to_list";
    const DESCRIPTION: &'static str = "Add profiles to a list";
    type Params = ListMembershipParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let count = params.profile_ids.len();
        let body = Document::linkage(PROFILE, params.profile_ids);
        client.add_profiles_to_list(&params.list_id, &body).await?;
        Ok(ToolReply::message(format!(
            "Successfully added {} profiles to list {}",
            count, params.list_id
        )))
    }
}

pub struct RemoveProfilesFromListTool;

#[async_trait]
impl KlaviyoTool for RemoveProfilesFromListTool {
    const NAME: &'static str = "remove_profiles_from_list";
    const DESCRIPTION: &'static str = "Remove profiles from a list";
    type Params = ListMembershipParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let count = params.profile_ids.len();
        let body = Document::linkage(PROFILE, params.profile_ids);
        client
            .remove_profiles_from_list(&params.list_id, &body)
            .await?;
        Ok(ToolReply::message(format!(
            "Successfully removed {} profiles from list {}",
            count, params.list_id
        )))
    }
}
