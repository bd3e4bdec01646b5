mod attached_picture_frame;
mod language_frame;
mod text_information_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use language_frame::CommentFrame;
pub use text_information_frame::TextInformationFrame;
