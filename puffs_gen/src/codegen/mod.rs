pub mod c;
pub mod c_gen;

/// Translation unit to produce for a package.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OutputMode {
    /* Declarations only */
    Header,
    /* Declarations plus constructor/destructor bodies */
    Source,
}

impl OutputMode {
    pub fn extension(self) -> char {
        match self {
            OutputMode::Header => 'h',
            OutputMode::Source => 'c',
        }
    }
}
