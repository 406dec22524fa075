//! Incremental component construction
//!
//! [`ComponentBuilder`] is what the parser drives: it applies one top-level
//! child element at a time and owns the rules about which occurrence of a
//! repeated tag wins. It can also be used directly to assemble metadata in
//! code, finishing with [`build`](ComponentBuilder::build) or
//! [`build_validated`](ComponentBuilder::build_validated).

use super::component::{Component, IconAttributes};
use super::provide::Provide;
use super::release::Release;
use crate::documents::Element;
use crate::error::Result;
use crate::markup::{join_lines, parse_description};

/// Recognized top-level children of `<component>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComponentChild {
    Id,
    UpdateContact,
    MetadataLicense,
    Releases,
    Provides,
    Kudos,
    Keywords,
    ProjectLicense,
    DeveloperName,
    Name,
    PkgName,
    Summary,
    Description,
    Url,
    Icon,
    Ignored,
}

impl ComponentChild {
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag {
            "id" => ComponentChild::Id,
            "updatecontact" | "update_contact" => ComponentChild::UpdateContact,
            "metadata_license" => ComponentChild::MetadataLicense,
            "releases" => ComponentChild::Releases,
            "provides" => ComponentChild::Provides,
            "kudos" => ComponentChild::Kudos,
            "keywords" => ComponentChild::Keywords,
            "project_license" | "licence" => ComponentChild::ProjectLicense,
            "developer_name" => ComponentChild::DeveloperName,
            "name" => ComponentChild::Name,
            "pkgname" => ComponentChild::PkgName,
            "summary" => ComponentChild::Summary,
            "description" => ComponentChild::Description,
            "url" => ComponentChild::Url,
            "icon" => ComponentChild::Icon,
            _ => ComponentChild::Ignored,
        }
    }
}

fn is_unset(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

fn text_of(node: &Element) -> Option<String> {
    node.text().map(str::to_string)
}

/// Builder for [`Component`]
#[derive(Debug, Clone, Default)]
pub struct ComponentBuilder {
    component: Component,
}

impl ComponentBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the `type` attribute and children of a `<component>` element
    pub fn from_element(node: &Element) -> Result<Self> {
        let mut builder = Self::new();
        if let Some(kind) = node.attribute("type") {
            builder.component.kind = Some(kind.to_string());
        }
        for child in &node.children {
            builder.apply(child)?;
        }
        Ok(builder)
    }

    /// Apply one top-level child element
    pub(crate) fn apply(&mut self, node: &Element) -> Result<()> {
        let c = &mut self.component;
        match ComponentChild::from_tag(&node.tag) {
            ComponentChild::Id => c.id = text_of(node),
            ComponentChild::UpdateContact => c.update_contact = text_of(node),
            ComponentChild::MetadataLicense => c.metadata_license = text_of(node),
            ComponentChild::ProjectLicense => c.project_license = text_of(node),
            ComponentChild::DeveloperName => c.developer_name = Some(join_lines(node.text())),
            ComponentChild::Releases => {
                for release in node.find_children("release") {
                    c.add_release(Release::from_element(release)?);
                }
            }
            ComponentChild::Provides => {
                for provide in &node.children {
                    c.add_provide(Provide::from_element(provide));
                }
            }
            ComponentChild::Kudos => {
                c.kudos
                    .extend(node.find_children("kudo").map(|k| k.text().unwrap_or_default().to_string()));
            }
            ComponentChild::Keywords => {
                c.keywords.extend(
                    node.find_children("keyword")
                        .map(|k| k.text().unwrap_or_default().to_string()),
                );
            }
            // The untranslated name, summary and description come first
            ComponentChild::Name if is_unset(&c.name) => c.name = Some(join_lines(node.text())),
            ComponentChild::PkgName if is_unset(&c.pkgname) => {
                c.pkgname = Some(join_lines(node.text()))
            }
            ComponentChild::Summary if is_unset(&c.summary) => {
                c.summary = Some(join_lines(node.text()))
            }
            ComponentChild::Description if is_unset(&c.description) => {
                c.description = Some(parse_description(node)?)
            }
            ComponentChild::Name
            | ComponentChild::PkgName
            | ComponentChild::Summary
            | ComponentChild::Description => {}
            ComponentChild::Url => {
                let key = node.attribute("type").unwrap_or("homepage").to_string();
                c.urls.insert(key, node.text().unwrap_or_default().to_string());
            }
            ComponentChild::Icon => {
                let key = node.attribute("type").unwrap_or("unknown").to_string();
                let mut attrs: IconAttributes = node
                    .attributes
                    .iter()
                    .filter(|(name, _)| name.as_str() != "type")
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect();
                attrs.insert("value".to_string(), node.text().unwrap_or_default().to_string());
                c.icons.entry(key).or_default().push(attrs);
            }
            ComponentChild::Ignored => {
                tracing::trace!(tag = %node.tag, "ignoring unknown <component> child");
            }
        }
        Ok(())
    }

    /// Set the component id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.component.id = Some(id.into());
        self
    }

    /// Set the component kind, e.g. `firmware`
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.component.kind = Some(kind.into());
        self
    }

    /// Set the update contact
    pub fn update_contact(mut self, contact: impl Into<String>) -> Self {
        self.component.update_contact = Some(contact.into());
        self
    }

    /// Set the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.component.name = Some(name.into());
        self
    }

    /// Set the package name
    pub fn pkgname(mut self, pkgname: impl Into<String>) -> Self {
        self.component.pkgname = Some(pkgname.into());
        self
    }

    /// Set the one-line summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.component.summary = Some(summary.into());
        self
    }

    /// Set the description markup
    pub fn description(mut self, markup: impl Into<String>) -> Self {
        self.component.description = Some(markup.into());
        self
    }

    /// Set the metadata license
    pub fn metadata_license(mut self, license: impl Into<String>) -> Self {
        self.component.metadata_license = Some(license.into());
        self
    }

    /// Set the project license
    pub fn project_license(mut self, license: impl Into<String>) -> Self {
        self.component.project_license = Some(license.into());
        self
    }

    /// Set the developer name
    pub fn developer_name(mut self, name: impl Into<String>) -> Self {
        self.component.developer_name = Some(name.into());
        self
    }

    /// Set a URL of the given kind
    pub fn url(mut self, kind: impl Into<String>, url: impl Into<String>) -> Self {
        self.component.urls.insert(kind.into(), url.into());
        self
    }

    /// Add an icon of the given kind
    pub fn icon(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        let mut attrs = IconAttributes::new();
        attrs.insert("value".to_string(), value.into());
        self.component.icons.entry(kind.into()).or_default().push(attrs);
        self
    }

    /// Add a release, unless one with the same version exists
    pub fn release(mut self, release: Release) -> Self {
        self.component.add_release(release);
        self
    }

    /// Add a provide, unless one with the same value exists
    pub fn provide(mut self, provide: Provide) -> Self {
        self.component.add_provide(provide);
        self
    }

    /// Add a kudo
    pub fn kudo(mut self, kudo: impl Into<String>) -> Self {
        self.component.kudos.push(kudo.into());
        self
    }

    /// Add a keyword
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.component.keywords.push(keyword.into());
        self
    }

    /// Finish without validating
    pub fn build(self) -> Component {
        self.component
    }

    /// Finish and validate
    pub fn build_validated(self) -> Result<Component> {
        self.component.validate()?;
        Ok(self.component)
    }
}
