/// Built-in stop words: high-frequency Arabic function words and fillers
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "في", "من", "على", "إلى", "عن", "مع", "هذا", "هذه", "تم", "قال",
    "كان", "كانت", "أن", "التي", "الذي", "هو", "هي", "قد", "ما", "لا",
    "إن", "نحو", "لدى", "عند", "حيث", "لقد", "أو", "و", "ثم", "أم", "عبر",
    "كل", "بعد", "قبل", "حتى", "إذا", "كما", "لكن", "انه", "انها", "منذ",
    "مثل", "حول", "ضمن", "فقط", "بين", "أيضا", "به", "بها", "منها", "عنها",
    "وقد", "فيه", "فيها", "تلك", "ذلك", "عليه", "عليها", "اول", "ضد", "بعض",
    "اي", "وفي", "وقال", "وكان", "المقبل", "الماضي", "اليوم", "ألف", "الف",
    "بن", "بإن", "لها", "له", "تكون", "وأن", "صلى", "وسلم",
    "تحت", "جدا", "ذات", "حاليا", "بشكل", "أبو", "بكر", "حسب",
];
