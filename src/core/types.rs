use serde::{Deserialize, Serialize};

/// How many ticks it takes to build a product once a worker holds both components
pub const ASSEMBLY_DURATION: u32 = 4;

/// Content of a belt slot or of a worker's hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Empty,
    ComponentA,
    ComponentB,
    Finished,
}

impl Symbol {
    /// Raw component kinds that can be combined into a finished product
    pub const COMPONENTS: [Symbol; 2] = [Symbol::ComponentA, Symbol::ComponentB];

    /// Alphabet the belt draws from when injecting into its first slot
    pub const CHOICES: [Symbol; 3] = [Symbol::ComponentA, Symbol::ComponentB, Symbol::Empty];

    /// True for raw components, i.e. anything a worker may pick up
    pub fn is_component(self) -> bool {
        !matches!(self, Symbol::Empty | Symbol::Finished)
    }

    pub fn is_empty(self) -> bool {
        self == Symbol::Empty
    }

    pub fn is_finished(self) -> bool {
        self == Symbol::Finished
    }

    /// Single-character tag used by log lines and text renderers
    pub fn as_char(self) -> char {
        match self {
            Symbol::Empty => ' ',
            Symbol::ComponentA => 'A',
            Symbol::ComponentB => 'B',
            Symbol::Finished => 'C',
        }
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::Empty
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Side of the belt a worker stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Up,
    Down,
}

impl Side {
    pub fn marker(self) -> char {
        match self {
            Side::Up => '^',
            Side::Down => 'v',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_classification() {
        assert!(Symbol::ComponentA.is_component());
        assert!(Symbol::ComponentB.is_component());
        assert!(!Symbol::Empty.is_component());
        assert!(!Symbol::Finished.is_component());
    }

    #[test]
    fn test_choices_cover_components_and_empty() {
        for component in Symbol::COMPONENTS {
            assert!(Symbol::CHOICES.contains(&component));
        }
        assert!(Symbol::CHOICES.contains(&Symbol::Empty));
        assert!(!Symbol::CHOICES.contains(&Symbol::Finished));
    }

    #[test]
    fn test_display_tags() {
        assert_eq!(Symbol::Finished.to_string(), "C");
        assert_eq!(Symbol::Empty.to_string(), " ");
        assert_eq!(Side::Up.to_string(), "^");
        assert_eq!(Side::Down.to_string(), "v");
    }
}
