//! Wizard step ordering

use serde::{Deserialize, Serialize};

/// One of the five ordered wizard steps
///
/// Persisted as its 1-based number (`lastStep` in the snapshot).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    /// Contact details
    #[default]
    Contact = 1,
    /// Service selection
    Services = 2,
    /// Project scope
    Project = 3,
    /// Budget and timeline
    Commercial = 4,
    /// Consent and final submission
    Confirmation = 5,
}

impl Step {
    /// Total number of steps
    pub const COUNT: u8 = 5;

    pub const ALL: [Step; 5] = [
        Step::Contact,
        Step::Services,
        Step::Project,
        Step::Commercial,
        Step::Confirmation,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_first(self) -> bool {
        self == Step::Contact
    }

    pub fn is_last(self) -> bool {
        self == Step::Confirmation
    }

    /// Chip text shown above the step, e.g. "Etapa 2 de 5"
    pub fn title(self) -> String {
        format!("Etapa {} de {}", self.number(), Self::COUNT)
    }

    /// Prompt displayed under the chip
    pub fn prompt(self) -> &'static str {
        match self {
            Step::Contact => "Vamos começar! Conta um pouco sobre você.",
            Step::Services => "O que você precisa? Escolha uma opção abaixo:",
            Step::Project => "Conte-nos mais sobre seu projeto. Quanto mais detalhes, melhor!",
            Step::Commercial => {
                "Defina um orçamento e prazo para que possamos oferecer a melhor solução."
            }
            Step::Confirmation => "Quase lá! Finalize sua solicitação.",
        }
    }

    /// Completion ratio used by the progress gauge
    pub fn progress(self) -> f64 {
        f64::from(self.number()) / f64::from(Self::COUNT)
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::from_number(value)
            .ok_or_else(|| format!("step {value} is out of range 1..={}", Step::COUNT))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}
