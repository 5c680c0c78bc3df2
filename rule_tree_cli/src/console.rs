use itertools::Itertools;
use rule_tree::error::ReasoningError;
use rule_tree::provider::{Rejection, ValueProvider};
use rule_tree::value::AttributeValue;
use std::io::{self, BufRead, Write};

/// Interactive answers: prompts on `output`, reads one line per answer from `input`.
pub struct ConsoleProvider<R, W> {
    input: R,
    output: W,
}

impl ConsoleProvider<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, what: &str, text: &str) -> Result<String, ReasoningError> {
        write!(self.output, "{text}").map_err(provider_error)?;
        self.output.flush().map_err(provider_error)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(provider_error)?;
        if read == 0 {
            return Err(ReasoningError::ProviderExhausted(what.to_string()));
        }
        Ok(line.trim().to_string())
    }
}

fn provider_error(err: io::Error) -> ReasoningError {
    ReasoningError::Provider(err.to_string())
}

fn quoted<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items.into_iter().map(|item| format!("\"{item}\"")).join(", ")
}

impl<R: BufRead, W: Write> ValueProvider for ConsoleProvider<R, W> {
    fn request(
        &mut self,
        attribute: &str,
        allowed: &[&AttributeValue],
    ) -> Result<String, ReasoningError> {
        writeln!(self.output).map_err(provider_error)?;
        writeln!(self.output, "Predicate: \"{attribute}\"").map_err(provider_error)?;
        writeln!(self.output, "Possible values: {}", quoted(allowed)).map_err(provider_error)?;
        self.prompt(attribute, "Please enter the chosen predicate value: ")
    }

    fn choose_attribute(&mut self, candidates: &[&str]) -> Result<String, ReasoningError> {
        let text = format!("Please enter the predicate ({}): ", quoted(candidates));
        self.prompt("<predicate>", &text)
    }

    fn can_retry(&self) -> bool {
        true
    }

    fn rejected(&mut self, rejection: &Rejection) {
        // Nowhere better to report a broken terminal; the next prompt fails anyway.
        let _ = writeln!(self.output, "{rejection}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(input: &str) -> ConsoleProvider<&[u8], Vec<u8>> {
        ConsoleProvider::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn request_prints_the_choices_and_trims_the_answer() {
        let mut console = provider("  Sunny \n");
        let sunny = AttributeValue::from("sunny");
        let rainy = AttributeValue::from("rainy");
        let answer = console.request("weather", &[&rainy, &sunny]).unwrap();
        assert_eq!(answer, "Sunny");

        let shown = String::from_utf8(console.into_output()).unwrap();
        assert!(shown.contains("Predicate: \"weather\""));
        assert!(shown.contains("Possible values: \"rainy\", \"sunny\""));
    }

    #[test]
    fn choose_attribute_lists_candidates() {
        let mut console = provider("wind\n");
        assert_eq!(console.choose_attribute(&["outlook", "wind"]).unwrap(), "wind");
        let shown = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(shown, "Please enter the predicate (\"outlook\", \"wind\"): ");
    }

    #[test]
    fn end_of_input_exhausts_the_provider() {
        let mut console = provider("");
        let err = console.request("weather", &[]).unwrap_err();
        assert!(matches!(err, ReasoningError::ProviderExhausted(ref a) if a == "weather"));
    }

    #[test]
    fn rejections_are_reported() {
        let mut console = provider("");
        console.rejected(&Rejection::UnknownPredicate("colour".to_string()));
        let shown = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(shown, "\"colour\" is not a valid predicate\n");
    }
}
