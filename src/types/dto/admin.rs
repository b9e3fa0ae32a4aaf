use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct JournalistAccessRequest {
    pub granted: bool,
}

#[derive(Object, Debug)]
pub struct SuspensionRequest {
    pub suspended: bool,
}

#[derive(Object, Debug)]
pub struct UserListResponse {
    pub users: Vec<super::UserResponse>,
}
