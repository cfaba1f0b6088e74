// vocabulary.rs - Built-in word/meaning entries that generated levels draw from

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPair {
    pub word: &'static str,
    pub meaning: &'static str,
}

impl WordPair {
    pub const fn new(word: &'static str, meaning: &'static str) -> Self {
        Self { word, meaning }
    }
}

pub const VOCABULARY: [WordPair; 20] = [
    WordPair::new("Book", "Novel"),
    WordPair::new("Pen", "Writing tool"),
    WordPair::new("School", "Educational institution"),
    WordPair::new("House", "Home"),
    WordPair::new("Car", "Automobile"),
    WordPair::new("Sun", "Star"),
    WordPair::new("Moon", "Lunar body"),
    WordPair::new("Sea", "Ocean"),
    WordPair::new("Tree", "Plant"),
    WordPair::new("Cat", "Feline"),
    WordPair::new("Dog", "Canine"),
    WordPair::new("Apple", "Fruit"),
    WordPair::new("Water", "H2O"),
    WordPair::new("Fire", "Flame"),
    WordPair::new("Air", "Atmosphere"),
    WordPair::new("Earth", "Planet"),
    WordPair::new("Flower", "Bloom"),
    WordPair::new("Friend", "Companion"),
    WordPair::new("Family", "Relatives"),
    WordPair::new("Time", "Duration"),
];
