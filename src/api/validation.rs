use super::ApiError;

/// Reduces a client-supplied file name to its final path component.
pub fn validate_upload_file_name(name: &str) -> Result<&str, ApiError> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();

    if base.is_empty() || base == "." || base == ".." {
        return Err(ApiError::validation(format!(
            "Invalid upload file name: {name:?}"
        )));
    }

    if base.len() > 255 {
        return Err(ApiError::validation(
            "Upload file name must be 255 bytes or less",
        ));
    }

    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_upload_file_name() {
        assert_eq!(validate_upload_file_name("avatar.png").unwrap(), "avatar.png");
        assert_eq!(
            validate_upload_file_name("../../etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(
            validate_upload_file_name("C:\\Users\\me\\doc.txt").unwrap(),
            "doc.txt"
        );
        assert!(validate_upload_file_name("").is_err());
        assert!(validate_upload_file_name("..").is_err());
        assert!(validate_upload_file_name("dir/").is_err());
        assert!(validate_upload_file_name(&"a".repeat(256)).is_err());
    }
}
