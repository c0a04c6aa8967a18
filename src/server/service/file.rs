//! Uploaded documents stored on disk with their metadata in the database.

use std::path::{Path, PathBuf};

use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::file::FileRepository,
    error::AppError,
    model::{
        file::{CreateFileParams, StoredFile, UpdateFileParams, Upload, UploadRules},
        pagination::{Paginated, Pagination},
    },
};
use entity::enums::FileCategory;

const NAME_CHARSET: &[u8] = b"0123456789abcdef";
const NAME_LEN: usize = 32;

/// Most files accepted by one batch upload.
pub const MAX_BATCH_FILES: usize = 10;

pub struct FileService<'a> {
    db: &'a DatabaseConnection,
    upload_dir: &'a Path,
}

impl<'a> FileService<'a> {
    pub fn new(db: &'a DatabaseConnection, upload_dir: &'a Path) -> Self {
        Self { db, upload_dir }
    }

    pub async fn get_paginated(
        &self,
        category: Option<FileCategory>,
        pagination: Pagination,
    ) -> Result<Paginated<StoredFile>, AppError> {
        let (files, total) = FileRepository::new(self.db)
            .get_paginated(category, pagination)
            .await?;

        Ok(Paginated::new(files, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<StoredFile, AppError> {
        FileRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    /// Writes an upload under its category directory and records it.
    ///
    /// The stored name is random hex plus the original extension. If the metadata insert
    /// fails, the written file is removed again.
    ///
    /// # Returns
    /// - `Ok(StoredFile)` - The recorded file
    /// - `Err(AppError::BadRequest)` - Empty upload, disallowed MIME type or too large
    /// - `Err(AppError::IoErr)` - Writing to disk failed
    pub async fn upload(&self, user_id: i32, upload: Upload) -> Result<StoredFile, AppError> {
        check(&upload)?;
        self.store(user_id, upload).await
    }

    /// Stores a batch of uploads sharing one form.
    ///
    /// Every upload is checked before the first is written, so a disallowed file rejects
    /// the whole batch. If storing fails part way, the files already stored are deleted
    /// again.
    ///
    /// # Returns
    /// - `Ok(Vec<StoredFile>)` - The recorded files, in upload order
    /// - `Err(AppError::BadRequest)` - Empty batch, more than `MAX_BATCH_FILES`, or a
    ///   file failing the checks of `upload`
    pub async fn upload_many(
        &self,
        user_id: i32,
        uploads: Vec<Upload>,
    ) -> Result<Vec<StoredFile>, AppError> {
        if uploads.is_empty() {
            return Err(AppError::BadRequest("No files uploaded".to_string()));
        }
        if uploads.len() > MAX_BATCH_FILES {
            return Err(AppError::BadRequest(format!(
                "At most {} files can be uploaded at once",
                MAX_BATCH_FILES
            )));
        }
        for upload in &uploads {
            check(upload)?;
        }

        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.store(user_id, upload).await {
                Ok(file) => stored.push(file),
                Err(err) => {
                    for file in &stored {
                        if let Err(cleanup) = self.delete(file.id).await {
                            tracing::error!("Failed to roll back upload {}: {}", file.id, cleanup);
                        }
                    }
                    return Err(err);
                }
            }
        }

        Ok(stored)
    }

    async fn store(&self, user_id: i32, upload: Upload) -> Result<StoredFile, AppError> {
        let dir = self.upload_dir.join(upload.category.directory());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = stored_name(&upload.original_name);
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &upload.bytes).await?;

        let params = CreateFileParams {
            file_name,
            original_name: upload.original_name,
            mime_type: upload.mime_type,
            size: upload.bytes.len() as i64,
            path: path.to_string_lossy().into_owned(),
            category: upload.category,
            description: upload.description,
            tags: upload.tags,
            uploaded_by: user_id,
        };

        match FileRepository::new(self.db).create(params).await {
            Ok(file) => {
                tracing::info!("User {} uploaded {} ({} bytes)", user_id, file.file_name, file.size);
                Ok(file)
            }
            Err(err) => {
                if let Err(io_err) = tokio::fs::remove_file(&path).await {
                    tracing::error!("Failed to remove orphaned upload {:?}: {}", path, io_err);
                }
                Err(err.into())
            }
        }
    }

    pub async fn update(&self, id: i32, params: UpdateFileParams) -> Result<StoredFile, AppError> {
        FileRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    /// Soft deletes the record, then removes the file from disk.
    ///
    /// Disk failures after the record is gone are logged, not returned.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let file = self.get_by_id(id).await?;

        if !FileRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("File not found".to_string()));
        }

        match tokio::fs::remove_file(&file.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("File {} was already missing from disk", file.path);
            }
            Err(err) => {
                tracing::error!("Failed to remove deleted file {}: {}", file.path, err);
            }
        }

        Ok(())
    }

    /// Loads a file's metadata and contents for download.
    pub async fn read(&self, id: i32) -> Result<(StoredFile, Vec<u8>), AppError> {
        let file = self.get_by_id(id).await?;

        let bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound("File not found on disk".to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        Ok((file, bytes))
    }
}

/// Rejects empty uploads, MIME types outside the category's allow-list and oversized files.
fn check(upload: &Upload) -> Result<(), AppError> {
    if upload.bytes.is_empty() {
        return Err(AppError::BadRequest("No file uploaded".to_string()));
    }
    if !upload.category.allows(&upload.mime_type) {
        return Err(AppError::BadRequest(format!(
            "File type {} is not allowed",
            upload.mime_type
        )));
    }
    if upload.bytes.len() > upload.category.max_size() {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {} MiB limit",
            upload.category.max_size() / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Random hex name keeping the original extension, lowercased.
fn stored_name(original_name: &str) -> String {
    let mut rng = rand::rng();
    let mut name: String = (0..NAME_LEN)
        .map(|_| NAME_CHARSET[rng.random_range(0..NAME_CHARSET.len())] as char)
        .collect();

    if let Some(ext) = PathBuf::from(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        name.push('.');
        name.push_str(&ext.to_lowercase());
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_extension() {
        let name = stored_name("Delivery Note.PDF");

        assert_eq!(name.len(), NAME_LEN + 4);
        assert!(name.ends_with(".pdf"));
        assert!(name[..NAME_LEN].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn stored_name_without_extension() {
        let name = stored_name("README");

        assert_eq!(name.len(), NAME_LEN);
    }
}
