pub mod selections;

pub use selections::{
    Need, Recommendation, RecommendationSource, Selections, Specificity, Style, Timing,
};
