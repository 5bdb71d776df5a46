mod descriptor;
mod detail;

pub use self::descriptor::MixDescriptor;
pub use self::detail::MixDetail;
