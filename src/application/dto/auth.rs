#[derive(Debug)]
pub struct RegisterDTO {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug)]
pub struct LoginDTO {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone)]
pub struct SessionIdDTO {
    pub session_id: String,
    pub remember_me: bool,
}
