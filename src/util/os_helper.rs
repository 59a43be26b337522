use crate::post::PostPublisher;

pub fn get_name() -> String {
    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}

/// Publisher for posts created on this machine. `author` wins over the OS user name.
pub fn local_publisher(author: Option<String>) -> PostPublisher {
    PostPublisher {
        author: Some(author.unwrap_or_else(get_name)),
        ..Default::default()
    }
}
