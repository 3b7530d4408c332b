//! Onboarding profile model
//!
//! The nested cost survey collected by the onboarding wizard. Every numeric
//! field defaults to zero and is accepted as entered; there is no range or
//! consistency validation.
//!
//! Fields are addressable by `section.field` keys (for example
//! `housing.rent`) so renderers can drive the survey generically from
//! [`PROFILE_FIELDS`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// How often a cost field is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Annual,
}

impl Frequency {
    /// Normalize an amount to its monthly equivalent
    pub fn monthly(&self, amount: Money) -> Money {
        match self {
            Self::Monthly => amount,
            Self::Annual => amount.monthly_from_annual(),
        }
    }
}

/// The kind of value a profile field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Count,
    /// Income or savings target, not a fixed cost
    Amount,
    /// A recurring cost included in the fixed-cost total
    Cost(Frequency),
}

/// Metadata describing one addressable profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn text(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Text }
}

const fn count(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Count }
}

const fn amount(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Amount }
}

const fn monthly(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Cost(Frequency::Monthly) }
}

const fn annual(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Cost(Frequency::Annual) }
}

/// Every addressable field, in survey order
pub const PROFILE_FIELDS: &[FieldSpec] = &[
    text("personalInfo.name", "Your name"),
    count("personalInfo.age", "Age"),
    text("personalInfo.occupation", "Occupation"),
    text("personalInfo.familyStatus", "Family status"),
    count("personalInfo.children", "Number of children"),
    amount("income.monthlyNetIncome", "Monthly net income"),
    monthly("housing.rent", "Rent"),
    monthly("housing.utilities", "Utilities"),
    monthly("housing.otherHousing", "Other housing costs"),
    annual("housing.homeInsurance", "Home contents insurance (per year)"),
    monthly("transport.fuel", "Fuel"),
    monthly("transport.publicTransport", "Public transport"),
    monthly("transport.maintenance", "Vehicle maintenance"),
    annual("transport.carInsurance", "Car insurance (per year)"),
    annual("transport.carTax", "Vehicle tax (per year)"),
    monthly("insurance.healthInsurance", "Health insurance"),
    monthly("insurance.disabilityInsurance", "Disability insurance"),
    monthly("insurance.pensionInsurance", "Pension insurance"),
    monthly("insurance.privatePension", "Private pension"),
    annual("insurance.liabilityInsurance", "Liability insurance (per year)"),
    monthly("insurance.otherInsurance", "Other insurance"),
    monthly("digital.internet", "Internet"),
    monthly("digital.mobile", "Mobile phone"),
    monthly("digital.streaming", "Streaming"),
    monthly("digital.software", "Software"),
    monthly("digital.cloud", "Cloud storage"),
    monthly("digital.gaming", "Gaming"),
    monthly("health.medication", "Medication"),
    monthly("health.fitness", "Fitness"),
    monthly("health.wellness", "Wellness"),
    monthly("health.alternativeMedicine", "Alternative medicine"),
    monthly("health.dental", "Dental"),
    monthly("health.otherHealth", "Other health costs"),
    monthly("education.education", "Education"),
    monthly("education.books", "Books"),
    monthly("education.hobbies", "Hobbies"),
    monthly("education.restaurant", "Restaurants"),
    monthly("education.entertainment", "Entertainment"),
    monthly("education.travel", "Travel"),
    text("goals.financialGoal", "Financial goal"),
    amount("goals.savingsGoal", "Savings goal"),
    text("goals.timeframe", "Timeframe"),
];

/// Look up field metadata by key
pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    PROFILE_FIELDS.iter().find(|f| f.key == key)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub age: u32,
    pub occupation: String,
    pub family_status: String,
    pub children: u32,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 0,
            occupation: String::new(),
            family_status: "single".to_string(),
            children: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Income {
    pub monthly_net_income: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HousingCosts {
    pub rent: Money,
    pub utilities: Money,
    pub other_housing: Money,
    pub home_insurance: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransportCosts {
    pub fuel: Money,
    pub public_transport: Money,
    pub maintenance: Money,
    pub car_insurance: Money,
    pub car_tax: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsuranceCosts {
    pub health_insurance: Money,
    pub disability_insurance: Money,
    pub pension_insurance: Money,
    pub private_pension: Money,
    pub liability_insurance: Money,
    pub other_insurance: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DigitalCosts {
    pub internet: Money,
    pub mobile: Money,
    pub streaming: Money,
    pub software: Money,
    pub cloud: Money,
    pub gaming: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthCosts {
    pub medication: Money,
    pub fitness: Money,
    pub wellness: Money,
    pub alternative_medicine: Money,
    pub dental: Money,
    pub other_health: Money,
}

/// Leisure and education spending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationCosts {
    pub education: Money,
    pub books: Money,
    pub hobbies: Money,
    pub restaurant: Money,
    pub entertainment: Money,
    pub travel: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Goals {
    pub financial_goal: String,
    pub savings_goal: Money,
    pub timeframe: String,
}

/// Everything the onboarding survey collects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub personal_info: PersonalInfo,
    pub income: Income,
    pub housing: HousingCosts,
    pub transport: TransportCosts,
    pub insurance: InsuranceCosts,
    pub digital: DigitalCosts,
    pub health: HealthCosts,
    pub education: EducationCosts,
    pub goals: Goals,
}

/// Monthly fixed costs per survey group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedCostBreakdown {
    pub housing: Money,
    pub transport: Money,
    pub insurance: Money,
    pub digital: Money,
    pub health: Money,
    pub education: Money,
}

impl FixedCostBreakdown {
    pub fn total(&self) -> Money {
        self.groups().iter().map(|(_, amount)| *amount).sum()
    }

    /// Group labels paired with their monthly amounts
    pub fn groups(&self) -> [(&'static str, Money); 6] {
        [
            ("Housing", self.housing),
            ("Transport", self.transport),
            ("Insurance", self.insurance),
            ("Digital", self.digital),
            ("Health", self.health),
            ("Leisure & Education", self.education),
        ]
    }
}

/// Why a profile field could not be set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileFieldError {
    UnknownField(String),
    AmountTooLarge { key: String, amount: Money },
}

impl fmt::Display for ProfileFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(key) => write!(f, "Unknown profile field '{}'", key),
            Self::AmountTooLarge { key, amount } => write!(
                f,
                "Amount {} for '{}' exceeds the maximum of {}",
                amount,
                key,
                Money::MAX
            ),
        }
    }
}

impl std::error::Error for ProfileFieldError {}

impl OnboardingProfile {
    pub fn monthly_income(&self) -> Money {
        self.income.monthly_net_income
    }

    /// Sum of a survey section's costs, annual fields divided by twelve
    fn section_monthly(&self, section: &str) -> Money {
        PROFILE_FIELDS
            .iter()
            .filter(|f| f.key.split('.').next() == Some(section))
            .filter_map(|f| match f.kind {
                FieldKind::Cost(frequency) => {
                    self.money_field(f.key).map(|amount| frequency.monthly(amount))
                }
                _ => None,
            })
            .sum()
    }

    pub fn fixed_cost_breakdown(&self) -> FixedCostBreakdown {
        FixedCostBreakdown {
            housing: self.section_monthly("housing"),
            transport: self.section_monthly("transport"),
            insurance: self.section_monthly("insurance"),
            digital: self.section_monthly("digital"),
            health: self.section_monthly("health"),
            education: self.section_monthly("education"),
        }
    }

    /// Estimated monthly fixed costs declared during onboarding
    pub fn fixed_costs(&self) -> Money {
        self.fixed_cost_breakdown().total()
    }

    fn money_field(&self, key: &str) -> Option<Money> {
        let value = match key {
            "income.monthlyNetIncome" => self.income.monthly_net_income,
            "housing.rent" => self.housing.rent,
            "housing.utilities" => self.housing.utilities,
            "housing.otherHousing" => self.housing.other_housing,
            "housing.homeInsurance" => self.housing.home_insurance,
            "transport.fuel" => self.transport.fuel,
            "transport.publicTransport" => self.transport.public_transport,
            "transport.maintenance" => self.transport.maintenance,
            "transport.carInsurance" => self.transport.car_insurance,
            "transport.carTax" => self.transport.car_tax,
            "insurance.healthInsurance" => self.insurance.health_insurance,
            "insurance.disabilityInsurance" => self.insurance.disability_insurance,
            "insurance.pensionInsurance" => self.insurance.pension_insurance,
            "insurance.privatePension" => self.insurance.private_pension,
            "insurance.liabilityInsurance" => self.insurance.liability_insurance,
            "insurance.otherInsurance" => self.insurance.other_insurance,
            "digital.internet" => self.digital.internet,
            "digital.mobile" => self.digital.mobile,
            "digital.streaming" => self.digital.streaming,
            "digital.software" => self.digital.software,
            "digital.cloud" => self.digital.cloud,
            "digital.gaming" => self.digital.gaming,
            "health.medication" => self.health.medication,
            "health.fitness" => self.health.fitness,
            "health.wellness" => self.health.wellness,
            "health.alternativeMedicine" => self.health.alternative_medicine,
            "health.dental" => self.health.dental,
            "health.otherHealth" => self.health.other_health,
            "education.education" => self.education.education,
            "education.books" => self.education.books,
            "education.hobbies" => self.education.hobbies,
            "education.restaurant" => self.education.restaurant,
            "education.entertainment" => self.education.entertainment,
            "education.travel" => self.education.travel,
            "goals.savingsGoal" => self.goals.savings_goal,
            _ => return None,
        };
        Some(value)
    }

    fn money_field_mut(&mut self, key: &str) -> Option<&mut Money> {
        let field = match key {
            "income.monthlyNetIncome" => &mut self.income.monthly_net_income,
            "housing.rent" => &mut self.housing.rent,
            "housing.utilities" => &mut self.housing.utilities,
            "housing.otherHousing" => &mut self.housing.other_housing,
            "housing.homeInsurance" => &mut self.housing.home_insurance,
            "transport.fuel" => &mut self.transport.fuel,
            "transport.publicTransport" => &mut self.transport.public_transport,
            "transport.maintenance" => &mut self.transport.maintenance,
            "transport.carInsurance" => &mut self.transport.car_insurance,
            "transport.carTax" => &mut self.transport.car_tax,
            "insurance.healthInsurance" => &mut self.insurance.health_insurance,
            "insurance.disabilityInsurance" => &mut self.insurance.disability_insurance,
            "insurance.pensionInsurance" => &mut self.insurance.pension_insurance,
            "insurance.privatePension" => &mut self.insurance.private_pension,
            "insurance.liabilityInsurance" => &mut self.insurance.liability_insurance,
            "insurance.otherInsurance" => &mut self.insurance.other_insurance,
            "digital.internet" => &mut self.digital.internet,
            "digital.mobile" => &mut self.digital.mobile,
            "digital.streaming" => &mut self.digital.streaming,
            "digital.software" => &mut self.digital.software,
            "digital.cloud" => &mut self.digital.cloud,
            "digital.gaming" => &mut self.digital.gaming,
            "health.medication" => &mut self.health.medication,
            "health.fitness" => &mut self.health.fitness,
            "health.wellness" => &mut self.health.wellness,
            "health.alternativeMedicine" => &mut self.health.alternative_medicine,
            "health.dental" => &mut self.health.dental,
            "health.otherHealth" => &mut self.health.other_health,
            "education.education" => &mut self.education.education,
            "education.books" => &mut self.education.books,
            "education.hobbies" => &mut self.education.hobbies,
            "education.restaurant" => &mut self.education.restaurant,
            "education.entertainment" => &mut self.education.entertainment,
            "education.travel" => &mut self.education.travel,
            "goals.savingsGoal" => &mut self.goals.savings_goal,
            _ => return None,
        };
        Some(field)
    }

    fn text_field_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "personalInfo.name" => Some(&mut self.personal_info.name),
            "personalInfo.occupation" => Some(&mut self.personal_info.occupation),
            "personalInfo.familyStatus" => Some(&mut self.personal_info.family_status),
            "goals.financialGoal" => Some(&mut self.goals.financial_goal),
            "goals.timeframe" => Some(&mut self.goals.timeframe),
            _ => None,
        }
    }

    fn count_field_mut(&mut self, key: &str) -> Option<&mut u32> {
        match key {
            "personalInfo.age" => Some(&mut self.personal_info.age),
            "personalInfo.children" => Some(&mut self.personal_info.children),
            _ => None,
        }
    }

    /// Set a field from raw user input
    ///
    /// Numeric input that does not parse is stored as zero, mirroring a
    /// form that accepts whatever was typed. Amounts beyond [`Money::MAX`]
    /// are refused and leave the field unchanged.
    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<(), ProfileFieldError> {
        if let Some(field) = self.text_field_mut(key) {
            *field = raw.trim().to_string();
        } else if let Some(field) = self.count_field_mut(key) {
            *field = raw.trim().parse().unwrap_or(0);
        } else if let Some(field) = self.money_field_mut(key) {
            let amount = Money::parse(raw).unwrap_or_default();
            if !amount.is_within_limit() {
                return Err(ProfileFieldError::AmountTooLarge {
                    key: key.to_string(),
                    amount,
                });
            }
            *field = amount;
        } else {
            return Err(ProfileFieldError::UnknownField(key.to_string()));
        }
        Ok(())
    }

    /// Current value of a field, formatted for display or prefilling
    pub fn get_field(&self, key: &str) -> Option<String> {
        let text = match key {
            "personalInfo.name" => Some(self.personal_info.name.clone()),
            "personalInfo.occupation" => Some(self.personal_info.occupation.clone()),
            "personalInfo.familyStatus" => Some(self.personal_info.family_status.clone()),
            "goals.financialGoal" => Some(self.goals.financial_goal.clone()),
            "goals.timeframe" => Some(self.goals.timeframe.clone()),
            "personalInfo.age" => Some(self.personal_info.age.to_string()),
            "personalInfo.children" => Some(self.personal_info.children.to_string()),
            _ => None,
        };
        text.or_else(|| self.money_field(key).map(|m| m.format_with_symbol("")))
    }
}
