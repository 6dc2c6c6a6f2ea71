//! Static step table for the registration wizard

use super::field::{ChoiceOption, FieldName, FieldSpec};

/// Position of the wizard. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Aadhaar,
    Pan,
    Address,
    Submitted,
}

impl WizardStep {
    /// 1-based step number; 4 is the terminal submitted state
    pub fn number(&self) -> u8 {
        match self {
            Self::Aadhaar => 1,
            Self::Pan => 2,
            Self::Address => 3,
            Self::Submitted => 4,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Step definition, `None` once submitted
    pub fn definition(&self) -> Option<&'static StepDefinition> {
        STEPS.iter().find(|s| s.step == *self)
    }

    /// Short name shown by the progress tracker
    pub fn progress_label(&self) -> &'static str {
        match self {
            Self::Aadhaar => "Aadhaar Validation",
            Self::Pan => "PAN Validation",
            Self::Address => "Address Details",
            Self::Submitted => "Submitted",
        }
    }
}

/// Declarative description of one wizard step
#[derive(Debug)]
pub struct StepDefinition {
    pub step: WizardStep,
    pub title: &'static str,
    /// Column count for the field grid
    pub columns: u16,
    pub fields: &'static [FieldSpec],
    pub description: &'static [&'static str],
    pub terms: Option<FieldSpec>,
    /// Fields that must validate before leaving this step
    pub required: &'static [FieldName],
    pub submit_label: &'static str,
}

impl StepDefinition {
    /// Fields and the consent checkbox in render order
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().chain(self.terms.iter())
    }

    /// Fields that can take keyboard focus, in traversal order
    pub fn focusable_fields(&self) -> Vec<&FieldSpec> {
        self.all_fields().filter(|f| f.is_focusable()).collect()
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldSpec> {
        self.all_fields().find(|f| f.name == name)
    }
}

/// Organisation categories accepted by the PAN step
pub const ORGANISATION_TYPES: &[ChoiceOption] = &[
    ChoiceOption { value: "1", label: "Proprietary" },
    ChoiceOption { value: "2", label: "Partnership" },
    ChoiceOption { value: "3", label: "HUF" },
    ChoiceOption { value: "5", label: "Private Limited Company" },
    ChoiceOption { value: "4", label: "Limited Liability Partnership" },
    ChoiceOption { value: "6", label: "Public Limited Company" },
    ChoiceOption { value: "7", label: "Self Help Group" },
    ChoiceOption { value: "9", label: "Society/Club/Trust/AOP/BOI" },
    ChoiceOption { value: "8", label: "Co-operative" },
];

const AADHAAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(
        FieldName::AadhaarNumber,
        "Aadhaar Number/ आधार संख्या",
        "Your Aadhaar No",
    ),
    FieldSpec::text(
        FieldName::Name,
        "Name of Entrepreneur / उद्यमी का नाम",
        "Name as per Aadhaar",
    ),
];

const PAN_FIELDS: &[FieldSpec] = &[
    FieldSpec::radio(
        FieldName::OrganisationType,
        "Type of Organisation / संगठन का प्रकार",
        ORGANISATION_TYPES,
    ),
    FieldSpec::text(FieldName::PanNumber, "PAN Number", "Your PAN No"),
];

const ADDRESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(FieldName::PinCode, "PIN Code", "Enter 6-digit PIN"),
    FieldSpec::spacer(),
    FieldSpec::read_only(FieldName::State, "State", "State (auto-filled)"),
    FieldSpec::read_only(FieldName::City, "City", "City (auto-filled)"),
];

/// The three wizard steps, in order
pub static STEPS: [StepDefinition; 3] = [
    StepDefinition {
        step: WizardStep::Aadhaar,
        title: "1. Aadhaar Verification With OTP",
        columns: 2,
        fields: AADHAAR_FIELDS,
        description: &[
            "Aadhaar number shall be required for Udyam Registration.",
            "The Aadhaar number shall be of the proprietor in the case of a proprietorship firm, of the managing partner in the case of a partnership firm and of a karta in the case of a Hindu Undivided Family (HUF).",
            "In case of a Company or a Limited Liability Partnership or a Cooperative Society or a Society or a Trust, the organisation or its authorised signatory shall provide its GSTIN (As per applicablity of CGST Act 2017 and as notified by the ministry of MSME vide S.O. 1055(E) dated 05th March 2021) and PAN along with its Aadhaar number.",
        ],
        terms: Some(FieldSpec::checkbox(
            FieldName::Terms,
            "I, the holder of the above Aadhaar, hereby give my consent to Ministry of MSME, Government of India, for using my Aadhaar number as alloted by UIDAI for Udyam Registration. NIC / Ministry of MSME, Government of India, have informed me that my aadhaar data will not be stored/shared.",
        )),
        required: &[FieldName::AadhaarNumber, FieldName::Name, FieldName::Terms],
        submit_label: "Validate & Generate OTP",
    },
    StepDefinition {
        step: WizardStep::Pan,
        title: "2. PAN Verification",
        columns: 1,
        fields: PAN_FIELDS,
        description: &[
            "PAN of Organisation in case of Co-Operative/Pvt Ltd/Public Ltd/LLP. In case of Proprietor firm, PAN of Proprietor shall be mentioned.",
        ],
        terms: Some(FieldSpec::checkbox(
            FieldName::PanTerms,
            "I hereby agree to share my PAN details with the Income Tax Department for verification.",
        )),
        required: &[
            FieldName::OrganisationType,
            FieldName::PanNumber,
            FieldName::PanTerms,
        ],
        submit_label: "Validate PAN",
    },
    StepDefinition {
        step: WizardStep::Address,
        title: "3. Address Details",
        columns: 2,
        fields: ADDRESS_FIELDS,
        description: &[],
        terms: None,
        required: &[FieldName::PinCode, FieldName::State, FieldName::City],
        submit_label: "Submit Registration",
    },
];
