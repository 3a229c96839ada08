use heavydep_core::WeightedImport;

#[derive(Debug, Clone)]
pub struct WeighResult {
    pub pkg: String,
    /// Heaviest first
    pub imports: Vec<WeightedImport>,
    pub recursive: bool,
}
