//! Interactive onboarding wizard
//!
//! Walks the ten survey steps on a line-oriented terminal. Each field is
//! prompted with its current value; an empty answer keeps it. `<` goes back
//! a step and `q` saves progress and exits.

use std::io::{BufRead, Write};

use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::OnboardingProfile;
use crate::services::{Advance, OnboardingWizard};
use crate::storage::KeyValueStore;

/// Result of running the onboarding wizard
pub struct SetupResult {
    /// Whether the survey was completed
    pub completed: bool,
    /// The saved profile when completed
    pub profile: Option<OnboardingProfile>,
}

enum Answer {
    Value(String),
    Keep,
    Back,
    Quit,
}

/// The terminal front end for [`OnboardingWizard`]
pub struct SetupWizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> SetupWizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the survey, starting fresh or from saved progress
    pub fn run(&mut self, store: &dyn KeyValueStore, resume: bool) -> MoneyUpResult<SetupResult> {
        let mut wizard = if resume {
            OnboardingWizard::resume(store)
        } else {
            OnboardingWizard::new()
        };

        self.say("")?;
        self.say("===========================================")?;
        self.say("  Welcome to MoneyUP!")?;
        self.say("===========================================")?;
        self.say("")?;
        self.say("A few questions about your income and fixed costs.")?;
        self.say("Press Enter to keep a value, '<' to go back, 'q' to save and quit.")?;

        loop {
            let step = wizard.step();
            self.say("")?;
            self.say(&step.to_string())?;
            self.say(&"-".repeat(step.to_string().chars().count()))?;

            match self.ask_step(&mut wizard)? {
                Answer::Quit => {
                    wizard.save_progress(store)?;
                    self.say("")?;
                    self.say("Progress saved. Run 'moneyup onboard --resume' to continue.")?;
                    return Ok(SetupResult {
                        completed: false,
                        profile: None,
                    });
                }
                Answer::Back => {
                    if !wizard.back(store) {
                        self.say("Already at the first step.")?;
                    }
                    continue;
                }
                Answer::Value(_) | Answer::Keep => {}
            }

            if wizard.next(store)? == Advance::Completed {
                break;
            }
        }

        let profile = wizard.profile().clone();
        self.print_summary(&profile)?;

        Ok(SetupResult {
            completed: true,
            profile: Some(profile),
        })
    }

    /// Prompt every field of the current step; stops early on back or quit
    ///
    /// A rejected answer is reported and the same field asked again.
    fn ask_step(&mut self, wizard: &mut OnboardingWizard) -> MoneyUpResult<Answer> {
        for field in wizard.step().fields() {
            loop {
                let current = wizard.profile().get_field(field.key).unwrap_or_default();
                let prompt = if current.is_empty() {
                    format!("{}: ", field.label)
                } else {
                    format!("{} [{}]: ", field.label, current)
                };

                match self.prompt(&prompt)? {
                    Answer::Value(value) => match wizard.set_field(field.key, &value) {
                        Ok(()) => break,
                        Err(MoneyUpError::Validation(message)) => self.say(&message)?,
                        Err(e) => return Err(e),
                    },
                    Answer::Keep => break,
                    other => return Ok(other),
                }
            }
        }
        Ok(Answer::Keep)
    }

    fn print_summary(&mut self, profile: &OnboardingProfile) -> MoneyUpResult<()> {
        let breakdown = profile.fixed_cost_breakdown();

        self.say("")?;
        self.say("===========================================")?;
        self.say("  Onboarding complete")?;
        self.say("===========================================")?;
        self.say("")?;
        self.say(&format!("Monthly net income: {}", profile.monthly_income()))?;
        for (label, amount) in breakdown.groups() {
            self.say(&format!("  {:<20} {:>12}", label, amount.to_string()))?;
        }
        self.say(&format!("Estimated fixed costs: {}", breakdown.total()))?;
        self.say(&format!(
            "Available each month:  {}",
            profile.monthly_income() - breakdown.total()
        ))?;
        self.say("")?;
        self.say("Next: run 'moneyup pay --name <NAME> --email <EMAIL>' to unlock the dashboard.")
    }

    fn say(&mut self, line: &str) -> MoneyUpResult<()> {
        writeln!(self.output, "{}", line).map_err(|e| MoneyUpError::Io(e.to_string()))
    }

    /// Prompt for one answer; end of input counts as quit
    fn prompt(&mut self, prompt: &str) -> MoneyUpResult<Answer> {
        write!(self.output, "{}", prompt).map_err(|e| MoneyUpError::Io(e.to_string()))?;
        self.output
            .flush()
            .map_err(|e| MoneyUpError::Io(e.to_string()))?;

        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .map_err(|e| MoneyUpError::Io(e.to_string()))?;
        if read == 0 {
            return Ok(Answer::Quit);
        }

        Ok(match input.trim() {
            "" => Answer::Keep,
            "<" | "back" => Answer::Back,
            "q" | "quit" => Answer::Quit,
            value => Answer::Value(value.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PROFILE_FIELDS};
    use crate::services::{load_profile, OnboardingStep};
    use crate::storage::{read_flag, MemoryStore, StorageKey};
    use std::io::Cursor;

    fn run(store: &MemoryStore, input: &str, resume: bool) -> (SetupResult, String) {
        let mut output = Vec::new();
        let result = SetupWizard::new(Cursor::new(input.to_string()), &mut output)
            .run(store, resume)
            .unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_keep_everything_completes() {
        let store = MemoryStore::new();
        let input = "\n".repeat(PROFILE_FIELDS.len());

        let (result, output) = run(&store, &input, false);

        assert!(result.completed);
        assert!(read_flag(&store, StorageKey::OnboardingCompleted));
        assert!(output.contains("Onboarding complete"));
        assert_eq!(load_profile(&store), OnboardingProfile::default());
    }

    #[test]
    fn test_answers_are_saved() {
        let store = MemoryStore::new();
        // name, four blank personal fields, income, rent, utilities,
        // other housing, home insurance
        let mut input = String::from("Alex\n\n\n\n\n3000\n800\n250\n\n25\n");
        input.push_str(&"\n".repeat(PROFILE_FIELDS.len() - 10));

        let (result, _) = run(&store, &input, false);

        let profile = result.profile.unwrap();
        assert_eq!(profile.personal_info.name, "Alex");
        assert_eq!(profile.monthly_income(), Money::from_cents(300000));
        assert_eq!(profile.fixed_costs(), Money::from_cents(105208));
        assert_eq!(load_profile(&store), profile);
    }

    #[test]
    fn test_oversized_answer_is_asked_again() {
        let store = MemoryStore::new();
        // name, four blank personal fields, an oversized income then a valid one
        let mut input = String::from("Alex\n\n\n\n\n50000000000000000\n3000\n");
        input.push_str(&"\n".repeat(PROFILE_FIELDS.len() - 6));

        let (result, output) = run(&store, &input, false);

        assert!(result.completed);
        assert!(output.contains("exceeds the maximum"));
        assert_eq!(output.matches("Monthly net income").count(), 3);
        assert_eq!(
            load_profile(&store).monthly_income(),
            Money::from_cents(300000)
        );
    }

    #[test]
    fn test_quit_then_resume() {
        let store = MemoryStore::new();

        let (result, output) = run(&store, "Alex\n\nq\n", false);
        assert!(!result.completed);
        assert!(output.contains("Progress saved"));
        assert!(!read_flag(&store, StorageKey::OnboardingCompleted));

        let resumed = OnboardingWizard::resume(&store);
        assert_eq!(resumed.step(), OnboardingStep::PersonalInfo);
        assert_eq!(resumed.profile().personal_info.name, "Alex");

        let (result, output) = run(&store, "", true);
        assert!(!result.completed);
        assert!(output.contains("Step 2/10"));
    }

    #[test]
    fn test_back_returns_to_previous_step() {
        let store = MemoryStore::new();
        let (_, output) = run(&store, "Alex\n<\nSam\nq\n", false);

        assert_eq!(output.matches("Step 1/10").count(), 2);
        let resumed = OnboardingWizard::resume(&store);
        assert_eq!(resumed.step(), OnboardingStep::PersonalInfo);
        assert_eq!(resumed.profile().personal_info.name, "Sam");
    }
}
