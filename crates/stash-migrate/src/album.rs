//! Implicit album reconstruction
//!
//! The legacy store has no album table: an album exists because some files share
//! an `in_album` value. The first member visited (the donor) founds the album
//! and lends it its timestamps and visibility; later members join it.

use std::collections::HashSet;

use stash_core::models::{JoinFile, NewAlbum, NewFile};

use crate::mapper::MappedFile;
use crate::report::AlbumAction;

/// What to write for one mapped file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumPlan {
    /// Full file record, no album
    Standalone(NewFile),
    /// Full file record for the donor, then the album it founds
    Found { file: NewFile, album: NewAlbum },
    /// Minimal record joining an album founded earlier in the run
    Join(JoinFile),
}

impl AlbumPlan {
    pub fn action(&self) -> AlbumAction {
        match self {
            AlbumPlan::Standalone(_) => AlbumAction::Standalone,
            AlbumPlan::Found { album, .. } => AlbumAction::Founded {
                album_id: album.id.clone(),
            },
            AlbumPlan::Join(file) => AlbumAction::Joined {
                album_id: file.album_id.clone(),
            },
        }
    }
}

/// Tracks which albums have been created during the run
#[derive(Debug, Default)]
pub struct AlbumAggregator {
    materialized: HashSet<String>,
}

impl AlbumAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_materialized(&self, album_id: &str) -> bool {
        self.materialized.contains(album_id)
    }

    pub fn albums_created(&self) -> usize {
        self.materialized.len()
    }

    /// Decide how `file` is written and mark its album as materialized.
    ///
    /// Only call this once the file's content has been stored: a file whose
    /// content is missing must not found an album.
    pub fn route(&mut self, file: MappedFile) -> AlbumPlan {
        let Some(album_id) = file.album_id.clone() else {
            return AlbumPlan::Standalone(full_record(file));
        };

        if self.materialized.contains(&album_id) {
            return AlbumPlan::Join(JoinFile {
                album_id,
                id: file.id,
                display_name: file.display_name,
                storage_key: file.storage_key,
                size_bytes: file.size_bytes,
                mime_type: file.mime_type,
                uploaded_by: file.uploaded_by,
            });
        }

        self.materialized.insert(album_id.clone());

        let album = NewAlbum {
            id: album_id,
            file_ids: vec![file.id.clone()],
            uploaded_by: file.uploaded_by.clone(),
            uploaded_at: file.uploaded_at,
            expires_at: file.expires_at,
            is_private: file.is_private,
        };

        AlbumPlan::Found {
            file: full_record(file),
            album,
        }
    }
}

fn full_record(file: MappedFile) -> NewFile {
    NewFile {
        id: file.id,
        display_name: file.display_name,
        storage_key: file.storage_key,
        size_bytes: file.size_bytes,
        mime_type: file.mime_type,
        uploaded_by: file.uploaded_by,
        uploaded_at: file.uploaded_at,
        expires_at: file.expires_at,
        is_private: file.is_private,
    }
}
