/// Errors raised while building the mini-court or the mapper.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MiniCourtError {
    #[error("court dimensions must be finite and > 0")]
    InvalidDimensions,
    #[error("diagram layout is degenerate (width={width}, height={height}, padding={padding})")]
    InvalidLayout { width: f32, height: f32, padding: f32 },
    #[error("fallback pixel height must be finite and > 0 (got {0})")]
    InvalidFallbackHeight(f32),
    #[error("player {id} has a non-positive height of {meters} m")]
    InvalidPlayerHeight { id: u32, meters: f32 },
    #[error("no reference height configured for player {0}")]
    MissingReferencePlayer(u32),
    #[error("candidate keypoint set is empty or out of range")]
    InvalidCandidates,
}

/// Why a single object could not be placed on the mini-court.
///
/// Returned per object and frame; the mapper decides whether to substitute
/// a default or skip the object.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum MappingIssue {
    #[error("anchor position is not finite")]
    NonFiniteAnchor,
    #[error("pixel height {0} cannot calibrate a distance")]
    DegeneratePixelHeight(f32),
    #[error("physical height {0} m cannot calibrate a distance")]
    DegeneratePhysicalHeight(f32),
    #[error("no candidate reference keypoint is available")]
    NoCandidateKeypoint,
    #[error("keypoint {0} has no diagram counterpart")]
    KeypointOutOfRange(usize),
}
