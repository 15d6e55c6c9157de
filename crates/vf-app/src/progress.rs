#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Compiling,
    PreparingWorkspace,
    RunningSolver,
    DecodingOutput,
    CleaningUp,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::Compiling => "Compiling netlist",
            RunStage::PreparingWorkspace => "Preparing workspace",
            RunStage::RunningSolver => "Running solver",
            RunStage::DecodingOutput => "Decoding output",
            RunStage::CleaningUp => "Cleaning up",
            RunStage::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
        }
    }
}
