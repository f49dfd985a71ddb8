use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MenuCommand {
    Rates,
    Take,
    Pay,
    Quit,
    Sales,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownCommand;

impl FromStr for MenuCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rates" | "r" => Ok(MenuCommand::Rates),
            "take" | "t" => Ok(MenuCommand::Take),
            "pay" | "p" => Ok(MenuCommand::Pay),
            "quit" | "q" => Ok(MenuCommand::Quit),
            "sales" | "s" => Ok(MenuCommand::Sales),
            _ => Err(UnknownCommand),
        }
    }
}

/// Answer to "Would you like to pay?".
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
