//! Business commentary for the markdown report.
//!
//! The defaults describe the service-management demo workbook the toolkit was
//! first pointed at. Every field can be replaced from the `[narrative]` table
//! of the configuration file; sheets without an entry get generic text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Purpose shown for sheets without a configured one.
pub const DEFAULT_PURPOSE: &str = "Business data table";

/// A titled group of bullet points in the business insights section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSection {
    pub heading: String,
    pub points: Vec<String>,
}

impl InsightSection {
    fn new(heading: &str, points: &[&str]) -> Self {
        Self {
            heading: heading.to_string(),
            points: points.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Narrative {
    /// Report title (first heading).
    pub title: String,
    /// Completes "...detailed business data for ___".
    pub system_description: String,
    /// Symbol printed before monetary totals.
    pub currency_symbol: String,
    /// Sheet name to one-line purpose.
    pub sheet_purposes: BTreeMap<String, String>,
    /// Sheet name to extra key-insight bullets.
    pub sheet_notes: BTreeMap<String, Vec<String>>,
    pub business_insights: Vec<InsightSection>,
}

impl Narrative {
    pub fn purpose(&self, sheet: &str) -> &str {
        self.sheet_purposes
            .get(sheet)
            .map_or(DEFAULT_PURPOSE, String::as_str)
    }

    pub fn notes(&self, sheet: &str) -> &[String] {
        self.sheet_notes.get(sheet).map(Vec::as_slice).unwrap_or_default()
    }
}

fn owned_map<V: Clone>(entries: &[(&str, V)]) -> BTreeMap<String, V> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn notes(points: &[&str]) -> Vec<String> {
    points.iter().map(ToString::to_string).collect()
}

impl Default for Narrative {
    fn default() -> Self {
        let sheet_purposes = owned_map(&[
            ("Client", "Master client information and account management details".to_string()),
            ("Installation", "Physical locations where services are provided".to_string()),
            ("Contract", "Service agreements and contract terms".to_string()),
            (
                "Contract Service (Project)",
                "Individual services within contracts with pricing".to_string(),
            ),
            (
                "Installation Services (Sub Pro)",
                "Services assigned to specific installations".to_string(),
            ),
            ("Visits", "Individual service visits and appointments".to_string()),
            (
                "Resources",
                "Personnel and service providers (doctors, engineers, etc.)".to_string(),
            ),
        ]);

        let sheet_notes = owned_map(&[
            ("Client", notes(&["Has dedicated account, CAD, and finance managers"])),
            ("Installation", notes(&["All installations in Athens metropolitan area"])),
            (
                "Contract",
                notes(&["Contract durations range from 2004 to 2099 (some indefinite term)"]),
            ),
            (
                "Installation Services (Sub Pro)",
                notes(&["All services currently marked as inactive (status 0)"]),
            ),
            ("Visits", notes(&["Spans from 2023 to 2026"])),
            ("Resources", notes(&["Mix of medical and engineering professionals"])),
        ]);

        let business_insights = vec![
            InsightSection::new(
                "Client Management",
                &[
                    "Single client system: DEMO HELLAS A.E.E. (Company Code: C000011)",
                    "Client has multiple installations and contracts",
                    "Active customer with comprehensive service coverage",
                ],
            ),
            InsightSection::new(
                "Installation Management",
                &[
                    "**7 installations** across different locations in Athens area",
                    "Mix of active (2) and inactive (5) installations",
                    "Employee allocation ranges from 1-46 per installation",
                    "All installations belong to the same client",
                ],
            ),
            InsightSection::new(
                "Contract Management",
                &[
                    "**5 contracts** with varying durations and values",
                    "Total contract value: €19,967.27 (excluding one null value)",
                    "Mix of indefinite term contracts and time-bound agreements",
                    "All contracts are currently active except one (THE DREAM)",
                ],
            ),
            InsightSection::new(
                "Service Delivery",
                &[
                    "**13 contract services** spanning multiple years (2020-2025)",
                    "Primary service: \"Ιατρός Εργασίας\" (Occupational Physician)",
                    "Revenue range: €670 - €2,589.40 per service",
                    "**64 installation services** managed across locations",
                ],
            ),
            InsightSection::new(
                "Resource Management",
                &[
                    "**13 resources** (personnel) with various specialties",
                    "Specialties include: Παθολόγος, Ιατρός, Παιδίατρος, Engineers",
                    "Resources distributed across Athens, Γέρακας, and Καλλιθέα",
                    "**202 visits** scheduled/completed across the system",
                ],
            ),
            InsightSection::new(
                "Visit Management",
                &[
                    "Visit statuses: Προς έναρξη (upcoming), Ολοκληρώθηκε (completed)",
                    "Average visit duration: 2 hours",
                    "Visits span from 2023 to 2026, indicating long-term planning",
                ],
            ),
        ];

        Self {
            title: "COMPREHENSIVE EXCEL DATA ANALYSIS REPORT".to_string(),
            system_description: "a service management system".to_string(),
            currency_symbol: "€".to_string(),
            sheet_purposes,
            sheet_notes,
            business_insights,
        }
    }
}
