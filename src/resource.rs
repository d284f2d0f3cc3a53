// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Discovery of documents to build [`Feature`]s from.
//!
//! [`Feature`]: crate::Feature

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Document discovered by a [`ResourceLoader`].
pub trait Resource {
    /// Identifier of this [`Resource`].
    fn uri(&self) -> &str;

    /// Reads the content of this [`Resource`].
    ///
    /// # Errors
    ///
    /// If the content can't be read.
    fn read(&self) -> io::Result<String>;
}

/// Locator of [`Resource`]s.
pub trait ResourceLoader {
    /// Type of the located [`Resource`]s.
    type Resource: Resource;

    /// Returns all the [`Resource`]s at the given `path` having the given
    /// `suffix`. Nothing is returned for a non-existent `path`.
    fn resources(&self, path: &str, suffix: &str) -> Vec<Self::Resource>;
}

/// [`ResourceLoader`] walking the file system.
///
/// A path to a file is taken as is. A directory is walked recursively for
/// files ending with the suffix, case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct FsResourceLoader {
    root: Option<PathBuf>,
}

impl FsResourceLoader {
    /// Creates a new [`FsResourceLoader`] resolving paths as given.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Creates a new [`FsResourceLoader`] resolving paths against the given
    /// `root`, which is stripped from the [`Resource`] identifiers.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resource(&self, path: PathBuf) -> FsResource {
        let uri = self
            .root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();
        FsResource { uri, path }
    }
}

impl ResourceLoader for FsResourceLoader {
    type Resource = FsResource;

    fn resources(&self, path: &str, suffix: &str) -> Vec<FsResource> {
        let path = self
            .root
            .as_deref()
            .map_or_else(|| PathBuf::from(path), |root| root.join(path));

        if path.is_file() {
            return vec![self.resource(path)];
        }
        if !path.is_dir() {
            tracing::debug!(path = %path.display(), "path doesn't exist");
            return Vec::new();
        }

        let walker = match globwalk::GlobWalkerBuilder::new(
            &path,
            format!("*{suffix}"),
        )
        .case_insensitive(true)
        .build()
        {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to walk directory",
                );
                return Vec::new();
            }
        };
        walker
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| self.resource(entry.into_path()))
            .collect()
    }
}

/// File discovered by a [`FsResourceLoader`].
#[derive(Clone, Debug)]
pub struct FsResource {
    uri: String,
    path: PathBuf,
}

impl FsResource {
    /// Location of this [`FsResource`] on the file system.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for FsResource {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// In-memory [`Resource`].
///
/// A slice of these is a [`ResourceLoader`] matching identifiers equal to the
/// path, or lying under it as a directory.
#[derive(Clone, Debug)]
pub struct StaticResource {
    uri: String,
    content: String,
}

impl StaticResource {
    /// Creates a new [`StaticResource`] out of its identifier and content.
    #[must_use]
    pub fn new(uri: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            content: content.into(),
        }
    }

    fn is_at(&self, path: &str, suffix: &str) -> bool {
        if self.uri == path {
            return true;
        }
        let dir = path.trim_end_matches('/');
        self.uri.ends_with(suffix)
            && (dir.is_empty()
                || self
                    .uri
                    .strip_prefix(dir)
                    .is_some_and(|rest| rest.starts_with('/')))
    }
}

impl Resource for StaticResource {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn read(&self) -> io::Result<String> {
        Ok(self.content.clone())
    }
}

impl ResourceLoader for [StaticResource] {
    type Resource = StaticResource;

    fn resources(&self, path: &str, suffix: &str) -> Vec<StaticResource> {
        self.iter().filter(|r| r.is_at(path, suffix)).cloned().collect()
    }
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for &L {
    type Resource = L::Resource;

    fn resources(&self, path: &str, suffix: &str) -> Vec<Self::Resource> {
        (**self).resources(path, suffix)
    }
}
