//! Vote entity <-> model mapper

use board_core::entities::Vote;
use board_core::error::DomainError;
use board_core::value_objects::{PostId, UserId, VoteType};

use crate::models::VoteModel;

/// Parse a stored vote type; an unknown value is a storage fault
pub fn parse_vote_type(raw: &str) -> Result<VoteType, DomainError> {
    VoteType::from_db(raw)
        .ok_or_else(|| DomainError::DatabaseError(format!("unknown vote type '{raw}'")))
}

/// Convert VoteModel to Vote entity
impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        Ok(Vote {
            id: model.id,
            post_id: PostId::from_uuid(model.post_id),
            user_id: UserId::from_stored(model.user_id),
            vote_type: parse_vote_type(&model.vote_type)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
