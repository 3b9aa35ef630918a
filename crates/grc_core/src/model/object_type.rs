//! Object type catalog.
//!
//! # Responsibility
//! - Enumerate every domain object type the UI services can drive.
//! - Resolve per-type configuration through one explicit descriptor table.
//!
//! # Invariants
//! - `versions_widget` implies `snapshotable`.
//! - Descriptor lookup never fails for a declared variant; the table order
//!   is checked at compile time.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Domain object types known to the web UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Program,
    Audit,
    Assessment,
    AssessmentTemplate,
    Issue,
    Control,
    Objective,
    Risk,
    OrgGroup,
    Product,
    ProductGroup,
    Regulation,
    Standard,
    Requirement,
    Policy,
    Contract,
    Threat,
    TechnologyEnvironment,
    Project,
    KeyReport,
    AccessGroup,
    AccountBalance,
    DataAsset,
    Facility,
    Market,
    Metric,
    Process,
    System,
    Vendor,
}

/// LHN sections that hide their members until expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LhnSection {
    Directives,
    ControlsOrObjectives,
    PeopleOrGroups,
    AssetsOrBusiness,
    RisksOrThreats,
}

impl LhnSection {
    /// Toggle label rendered in the LHN.
    pub fn label(self) -> &'static str {
        match self {
            Self::Directives => "Directives",
            Self::ControlsOrObjectives => "Controls/Objectives",
            Self::PeopleOrGroups => "People/Groups",
            Self::AssetsOrBusiness => "Assets/Business",
            Self::RisksOrThreats => "Risks/Threats",
        }
    }
}

/// Static per-type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectDescriptor {
    pub obj_type: ObjectType,
    /// Singular title-case name, e.g. `TechnologyEnvironment`.
    pub name: &'static str,
    /// Plural display title, e.g. `Technology Environments`.
    pub plural_title: &'static str,
    /// URL collection segment, e.g. `technology_environments`.
    pub collection: &'static str,
    /// Widget fragment name, e.g. `technology_environment`.
    pub widget: &'static str,
    /// Mapped instances may be frozen snapshots.
    pub snapshotable: bool,
    /// The type has a dedicated "versions" widget.
    pub versions_widget: bool,
    /// Section to expand in the LHN before the type accordion is visible.
    pub lhn_section: Option<LhnSection>,
}

const fn descriptor(
    obj_type: ObjectType,
    name: &'static str,
    plural_title: &'static str,
    collection: &'static str,
    widget: &'static str,
    snapshotable: bool,
    versions_widget: bool,
    lhn_section: Option<LhnSection>,
) -> ObjectDescriptor {
    ObjectDescriptor {
        obj_type,
        name,
        plural_title,
        collection,
        widget,
        snapshotable,
        versions_widget,
        lhn_section,
    }
}

use LhnSection::{AssetsOrBusiness, ControlsOrObjectives, Directives, PeopleOrGroups, RisksOrThreats};

const DESCRIPTORS: &[ObjectDescriptor] = &[
    descriptor(ObjectType::Program, "Program", "Programs", "programs", "program", false, false, None),
    descriptor(ObjectType::Audit, "Audit", "Audits", "audits", "audit", false, false, None),
    descriptor(
        ObjectType::Assessment,
        "Assessment",
        "Assessments",
        "assessments",
        "assessment",
        false,
        false,
        None,
    ),
    descriptor(
        ObjectType::AssessmentTemplate,
        "AssessmentTemplate",
        "Assessment Templates",
        "assessment_templates",
        "assessment_template",
        false,
        false,
        None,
    ),
    descriptor(ObjectType::Issue, "Issue", "Issues", "issues", "issue", false, false, None),
    descriptor(
        ObjectType::Control,
        "Control",
        "Controls",
        "controls",
        "control",
        true,
        true,
        Some(ControlsOrObjectives),
    ),
    descriptor(
        ObjectType::Objective,
        "Objective",
        "Objectives",
        "objectives",
        "objective",
        true,
        true,
        Some(ControlsOrObjectives),
    ),
    descriptor(ObjectType::Risk, "Risk", "Risks", "risks", "risk", true, true, Some(RisksOrThreats)),
    descriptor(
        ObjectType::OrgGroup,
        "OrgGroup",
        "Org Groups",
        "org_groups",
        "org_group",
        true,
        true,
        Some(PeopleOrGroups),
    ),
    descriptor(
        ObjectType::Product,
        "Product",
        "Products",
        "products",
        "product",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(
        ObjectType::ProductGroup,
        "ProductGroup",
        "Product Groups",
        "product_groups",
        "product_group",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(
        ObjectType::Regulation,
        "Regulation",
        "Regulations",
        "regulations",
        "regulation",
        true,
        false,
        Some(Directives),
    ),
    descriptor(
        ObjectType::Standard,
        "Standard",
        "Standards",
        "standards",
        "standard",
        true,
        false,
        Some(Directives),
    ),
    descriptor(
        ObjectType::Requirement,
        "Requirement",
        "Requirements",
        "requirements",
        "requirement",
        true,
        false,
        Some(Directives),
    ),
    descriptor(ObjectType::Policy, "Policy", "Policies", "policies", "policy", true, false, Some(Directives)),
    descriptor(
        ObjectType::Contract,
        "Contract",
        "Contracts",
        "contracts",
        "contract",
        true,
        false,
        Some(Directives),
    ),
    descriptor(ObjectType::Threat, "Threat", "Threats", "threats", "threat", true, false, Some(RisksOrThreats)),
    descriptor(
        ObjectType::TechnologyEnvironment,
        "TechnologyEnvironment",
        "Technology Environments",
        "technology_environments",
        "technology_environment",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(ObjectType::Project, "Project", "Projects", "projects", "project", true, false, None),
    descriptor(
        ObjectType::KeyReport,
        "KeyReport",
        "Key Reports",
        "key_reports",
        "key_report",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(
        ObjectType::AccessGroup,
        "AccessGroup",
        "Access Groups",
        "access_groups",
        "access_group",
        true,
        false,
        Some(PeopleOrGroups),
    ),
    descriptor(
        ObjectType::AccountBalance,
        "AccountBalance",
        "Account Balances",
        "account_balances",
        "account_balance",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(
        ObjectType::DataAsset,
        "DataAsset",
        "Data Assets",
        "data_assets",
        "data_asset",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(
        ObjectType::Facility,
        "Facility",
        "Facilities",
        "facilities",
        "facility",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(ObjectType::Market, "Market", "Markets", "markets", "market", true, false, Some(AssetsOrBusiness)),
    descriptor(ObjectType::Metric, "Metric", "Metrics", "metrics", "metric", true, false, Some(AssetsOrBusiness)),
    descriptor(
        ObjectType::Process,
        "Process",
        "Processes",
        "processes",
        "process",
        true,
        false,
        Some(AssetsOrBusiness),
    ),
    descriptor(ObjectType::System, "System", "Systems", "systems", "system", true, false, Some(AssetsOrBusiness)),
    descriptor(ObjectType::Vendor, "Vendor", "Vendors", "vendors", "vendor", true, false, Some(PeopleOrGroups)),
];

// The table is indexed by discriminant: one entry per variant, in
// declaration order.
const _: () = {
    assert!(DESCRIPTORS.len() == ObjectType::Vendor as usize + 1);
    let mut index = 0;
    while index < DESCRIPTORS.len() {
        assert!(DESCRIPTORS[index].obj_type as usize == index);
        index += 1;
    }
};

impl ObjectType {
    /// Every declared object type in table order.
    pub fn all() -> impl Iterator<Item = ObjectType> {
        DESCRIPTORS.iter().map(|descriptor| descriptor.obj_type)
    }

    /// Returns the static descriptor for this type.
    pub fn descriptor(self) -> &'static ObjectDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Singular title-case name, e.g. `Control`.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn is_snapshotable(self) -> bool {
        self.descriptor().snapshotable
    }

    /// Parses a type from any of its display forms.
    ///
    /// Accepts singular or plural, title/snake/space-separated spelling and is
    /// case-insensitive: `"Org Groups"`, `"org_group"`, `"ORGGROUP"`.
    pub fn from_name(value: &str) -> Result<Self, UnknownObjectType> {
        let wanted = squash(value);
        if wanted.is_empty() {
            return Err(UnknownObjectType(value.to_string()));
        }
        DESCRIPTORS
            .iter()
            .find(|descriptor| {
                squash(descriptor.name) == wanted || squash(descriptor.plural_title) == wanted
            })
            .map(|descriptor| descriptor.obj_type)
            .ok_or_else(|| UnknownObjectType(value.trim().to_string()))
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Returned when a type name does not match any descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownObjectType(pub String);

impl Display for UnknownObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown object type: `{}`", self.0)
    }
}

impl Error for UnknownObjectType {}

#[cfg(test)]
mod tests {
    use super::{ObjectType, DESCRIPTORS};

    #[test]
    fn every_variant_has_exactly_one_descriptor() {
        for obj_type in ObjectType::all() {
            let count = DESCRIPTORS
                .iter()
                .filter(|descriptor| descriptor.obj_type == obj_type)
                .count();
            assert_eq!(count, 1, "{obj_type:?}");
        }
    }

    #[test]
    fn descriptor_lookup_returns_own_entry() {
        for obj_type in ObjectType::all() {
            assert_eq!(obj_type.descriptor().obj_type, obj_type);
        }
        assert_eq!(ObjectType::Vendor.name(), "Vendor");
        assert_eq!(ObjectType::TechnologyEnvironment.descriptor().collection, "technology_environments");
    }

    #[test]
    fn versions_widget_implies_snapshotable() {
        for descriptor in DESCRIPTORS {
            assert!(!descriptor.versions_widget || descriptor.snapshotable);
        }
    }

    #[test]
    fn from_name_accepts_display_forms() {
        assert_eq!(
            ObjectType::from_name("Technology Environments").unwrap(),
            ObjectType::TechnologyEnvironment
        );
        assert_eq!(ObjectType::from_name("org_group").unwrap(), ObjectType::OrgGroup);
        assert_eq!(ObjectType::from_name("programs").unwrap(), ObjectType::Program);
        assert!(ObjectType::from_name("Unicorn").is_err());
        assert!(ObjectType::from_name("  ").is_err());
    }
}
