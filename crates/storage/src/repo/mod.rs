mod blogs;
mod comments;
