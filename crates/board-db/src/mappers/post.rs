//! Post entity <-> model mapper

use board_core::entities::Post;
use board_core::value_objects::{PostId, PostType, UserId};

use crate::models::PostModel;

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::from_uuid(model.id),
            author_id: UserId::from_stored(model.user_id),
            content: model.content,
            tags: model.tags,
            post_type: PostType::from_db(&model.post_type),
            up_votes: model.up_votes,
            down_votes: model.down_votes,
            created_at: model.created_at,
            updated_at: model.updated_at,
            expired_at: model.expired_at,
        }
    }
}
