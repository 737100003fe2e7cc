#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quartile {
    pub const ALL: [Quartile; 4] = [Quartile::Q1, Quartile::Q2, Quartile::Q3, Quartile::Q4];

    /// Fixed-threshold band of a correct-answer total.
    pub fn categorize(value: f64) -> Quartile {
        if value < 10.0 {
            Quartile::Q1
        } else if value < 20.0 {
            Quartile::Q2
        } else if value < 30.0 {
            Quartile::Q3
        } else {
            Quartile::Q4
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quartile::Q1 => "Q1",
            Quartile::Q2 => "Q2",
            Quartile::Q3 => "Q3",
            Quartile::Q4 => "Q4",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Quartile::Q1 => 0,
            Quartile::Q2 => 1,
            Quartile::Q3 => 2,
            Quartile::Q4 => 3,
        }
    }
}

/// Item ordering shown by the combined time/mistakes chart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewMode {
    TimeSpent,
    AverageMistakes,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::TimeSpent, ViewMode::AverageMistakes];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::TimeSpent => "Time Spent",
            ViewMode::AverageMistakes => "Average Mistakes",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::TimeSpent => "Time Spent on Each Question",
            ViewMode::AverageMistakes => "Average Mistakes per Question",
        }
    }

    /// Visibility of the four bar series when this view is selected.
    pub fn visibility(self) -> [bool; 4] {
        match self {
            ViewMode::TimeSpent => [true, true, false, false],
            ViewMode::AverageMistakes => [false, false, true, true],
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/src_inline/core/model.rs"]
mod tests;
