//! Per-entity theme colors built on top of [`ColorResolver`].
//!
//! Each themed entity (a chat character, a user) has an avatar and a set of
//! text roles. Every role maps to a [`CategoryToken`] in the config; disabled
//! roles stay uncolored. A configured override color replaces all enabled
//! roles without looking at the avatar.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use swatch_theme::{Boosts, CategoryToken, Rgb};
use utoipa::ToSchema;

use super::color_resolver::ColorResolver;
use crate::models::{ImageSource, RolesConfig};

/// An entity to theme.
#[derive(Debug, Clone)]
pub struct ThemeRequest {
    pub name: String,
    pub avatar: Option<ImageSource>,
}

impl ThemeRequest {
    pub fn new(name: impl Into<String>, avatar: Option<ImageSource>) -> Self {
        Self {
            name: name.into(),
            avatar,
        }
    }
}

/// Resolved role colors for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EntityTheme {
    pub name: String,
    #[schema(value_type = Option<String>, example = "#f0a060")]
    pub quotation: Option<Rgb>,
    #[schema(value_type = Option<String>)]
    pub narration: Option<Rgb>,
    #[schema(value_type = Option<String>)]
    pub italic: Option<Rgb>,
    #[schema(value_type = Option<String>)]
    pub bold: Option<Rgb>,
    /// Color for the entity's name; set only when `color_name` is enabled
    #[schema(value_type = Option<String>)]
    pub name_color: Option<Rgb>,
    /// True when the colors came from a configured override
    pub overridden: bool,
}

pub struct ThemeService {
    resolver: Arc<ColorResolver>,
    roles: RolesConfig,
    overrides: HashMap<String, Rgb>,
}

impl ThemeService {
    pub fn new(
        resolver: Arc<ColorResolver>,
        roles: RolesConfig,
        overrides: HashMap<String, Rgb>,
    ) -> Self {
        Self {
            resolver,
            roles,
            overrides,
        }
    }

    pub fn roles(&self) -> &RolesConfig {
        &self.roles
    }

    /// Resolve one entity's role colors.
    pub async fn resolve(&self, request: &ThemeRequest, boosts: Boosts) -> EntityTheme {
        if let Some(&color) = self.overrides.get(&request.name) {
            tracing::debug!(entity = %request.name, %color, "Using color override");
            let pick = |token: CategoryToken| (!token.is_disabled()).then_some(color);
            return EntityTheme {
                name: request.name.clone(),
                quotation: pick(self.roles.quotation),
                narration: pick(self.roles.narration),
                italic: pick(self.roles.italic),
                bold: pick(self.roles.bold),
                name_color: self.roles.color_name.then_some(color),
                overridden: true,
            };
        }

        let Some(avatar) = &request.avatar else {
            return EntityTheme {
                name: request.name.clone(),
                quotation: None,
                narration: None,
                italic: None,
                bold: None,
                name_color: None,
                overridden: false,
            };
        };

        let role = move |token: CategoryToken| {
            self.resolver
                .resolve_category_color(avatar, token, boosts)
        };
        let quotation = role(self.roles.quotation).await;
        let narration = role(self.roles.narration).await;
        let italic = role(self.roles.italic).await;
        let bold = role(self.roles.bold).await;

        EntityTheme {
            name: request.name.clone(),
            quotation,
            narration,
            italic,
            bold,
            name_color: if self.roles.color_name { quotation } else { None },
            overridden: false,
        }
    }

    /// Resolve many entities concurrently; output order matches input order.
    pub async fn resolve_all(&self, requests: &[ThemeRequest], boosts: Boosts) -> Vec<EntityTheme> {
        futures_util::future::join_all(requests.iter().map(|r| self.resolve(r, boosts))).await
    }
}
