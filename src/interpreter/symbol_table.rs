use std::collections::HashMap;

/// The program's single flat variable namespace.
///
/// Reading a name that was never written binds it to `0` first, so lookups never fail.
#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: HashMap<String, i32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            variables: HashMap::new(),
        }
    }

    pub fn read(&mut self, name: &str) -> i32 {
        if let Some(value) = self.variables.get(name) {
            return *value;
        }

        self.variables.insert(name.to_owned(), 0);
        0
    }

    pub fn write(&mut self, name: &str, value: i32) {
        match self.variables.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.variables.insert(name.to_owned(), value);
            },
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_auto_vivifies() {
        let mut symbols = SymbolTable::new();
        assert!(!symbols.exists("x"));

        assert_eq!(0, symbols.read("x"));
        assert!(symbols.exists("x"));
        assert_eq!(0, symbols.read("x"));
        assert_eq!(1, symbols.len());
    }

    #[test]
    fn write_overwrites() {
        let mut symbols = SymbolTable::new();
        symbols.write("x", 4);
        symbols.write("x", -9);

        assert_eq!(-9, symbols.read("x"));
        assert_eq!(vec![("x", -9)], symbols.iter().collect::<Vec<_>>());
    }

    #[test]
    fn exists_does_not_insert() {
        let symbols = SymbolTable::new();
        assert!(!symbols.exists("never"));
        assert!(symbols.is_empty());
    }
}
