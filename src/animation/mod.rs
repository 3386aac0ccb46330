pub(crate) mod clock;
pub(crate) mod keyframes;
pub(crate) mod resolve;
