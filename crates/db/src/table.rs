use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    Name,
    Description,
    Ingredients,
    Method,
    SourceUrl,
    AddedBy,
    CreatedAt,
}
